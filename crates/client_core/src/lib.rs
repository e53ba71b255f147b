use reqwest::{Client, StatusCode};
use shared::{
    domain::CoffeeKind,
    protocol::{
        BrewForm, BrewOutcome, BrewResponseWire, DecodeError, OptionForm, OptionResponse,
        METHOD_MAKE_COFFEE,
    },
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub mod panel;

use panel::{reduce, ControlPanel, PanelEvent, RenderedCup};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered with status {0}")]
    Http(StatusCode),
    #[error("malformed brew response: {0}")]
    MalformedPayload(#[from] DecodeError),
    #[error("page does not expose a csrfmiddlewaretoken")]
    MissingToken,
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// HTTP half of the client: form POSTs against the two endpoints, plus
/// the page fetch that yields the anti-forgery token. No request is ever
/// issued without a token.
pub struct MachineClient {
    http: Client,
    base: Url,
    csrf_token: Option<String>,
}

impl MachineClient {
    pub fn new(base: Url) -> MachineClient {
        MachineClient {
            http: Client::new(),
            base,
            csrf_token: None,
        }
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// Fetches the machine page and scrapes the hidden token input out
    /// of the rendered form.
    pub async fn bootstrap(&mut self) -> Result<(), ClientError> {
        let response = self.http.get(self.base.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http(status));
        }
        let page = response.text().await?;
        let token = scrape_csrf_token(&page).ok_or(ClientError::MissingToken)?;
        debug!("bootstrapped with a fresh csrf token");
        self.csrf_token = Some(token);
        Ok(())
    }

    fn token(&self) -> Result<String, ClientError> {
        self.csrf_token.clone().ok_or(ClientError::MissingToken)
    }

    /// `POST /` with `method=make_coffee` and the selected type; decodes
    /// the response at the boundary.
    pub async fn make_coffee(&self, kind: CoffeeKind) -> Result<BrewOutcome, ClientError> {
        let form = BrewForm {
            csrfmiddlewaretoken: self.token()?,
            method: METHOD_MAKE_COFFEE.to_string(),
            coffee_type: kind.as_str().to_string(),
        };
        let response = self
            .http
            .post(self.base.clone())
            .form(&form)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "brew request rejected");
            return Err(ClientError::Http(status));
        }
        let wire: BrewResponseWire = response.json().await?;
        Ok(wire.decode()?)
    }

    /// `POST /ajax/` with the clicked control's identifier sent verbatim
    /// as the command.
    pub async fn apply_option(&self, identifier: &str) -> Result<String, ClientError> {
        let form = OptionForm {
            csrfmiddlewaretoken: self.token()?,
            method: identifier.to_string(),
        };
        let endpoint = self.base.join("/ajax/")?;
        let response = self.http.post(endpoint).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, identifier, "option request rejected");
            return Err(ClientError::Http(status));
        }
        let confirmation: OptionResponse = response.json().await?;
        Ok(confirmation.action)
    }
}

fn scrape_csrf_token(page: &str) -> Option<String> {
    let anchor = page.find("name=\"csrfmiddlewaretoken\"")?;
    let rest = &page[anchor..];
    let value_start = anchor + rest.find("value=\"")? + "value=\"".len();
    let value_rest = &page[value_start..];
    let value_end = value_start + value_rest.find('"')?;
    let token = &page[value_start..value_end];
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// A control panel driven over HTTP. Requests of each kind carry a
/// monotonic sequence number; a completion that is no longer the latest
/// of its kind is dropped before it can touch the panel, so overlapping
/// clicks cannot leave the panel showing an older result.
pub struct UiSession {
    client: MachineClient,
    panel: ControlPanel,
    brew_seq: u64,
    option_seq: u64,
}

impl UiSession {
    pub fn new(client: MachineClient) -> UiSession {
        UiSession {
            client,
            panel: ControlPanel::new(),
            brew_seq: 0,
            option_seq: 0,
        }
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn client(&self) -> &MachineClient {
        &self.client
    }

    pub async fn bootstrap(&mut self) -> Result<(), ClientError> {
        self.client.bootstrap().await
    }

    /// Issues a brew and applies its completion, unless a newer brew was
    /// started in the meantime.
    pub async fn make_coffee(&mut self, kind: CoffeeKind) -> &ControlPanel {
        let seq = self.begin_brew();
        let result = self.client.make_coffee(kind).await;
        self.complete_brew(seq, result);
        &self.panel
    }

    pub async fn apply_option(&mut self, identifier: &str) -> &ControlPanel {
        let seq = self.begin_option();
        let result = self.client.apply_option(identifier).await;
        self.complete_option(seq, result);
        &self.panel
    }

    pub fn begin_brew(&mut self) -> u64 {
        self.brew_seq += 1;
        reduce(&mut self.panel, PanelEvent::BrewStarted);
        self.brew_seq
    }

    /// Returns whether the completion was applied; stale completions are
    /// dropped.
    pub fn complete_brew(&mut self, seq: u64, result: Result<BrewOutcome, ClientError>) -> bool {
        if seq != self.brew_seq {
            debug!(seq, latest = self.brew_seq, "dropping stale brew completion");
            return false;
        }
        let event = match result {
            Ok(BrewOutcome::Problem(problems)) => PanelEvent::BrewFailed { problems },
            Ok(BrewOutcome::Image(url)) => PanelEvent::CupServed {
                cup: RenderedCup::Image(url),
            },
            Ok(BrewOutcome::Html(markup)) => PanelEvent::CupServed {
                cup: RenderedCup::Html(markup),
            },
            Err(error) => PanelEvent::RequestFailed {
                message: error.to_string(),
            },
        };
        reduce(&mut self.panel, event);
        true
    }

    pub fn begin_option(&mut self) -> u64 {
        self.option_seq += 1;
        reduce(&mut self.panel, PanelEvent::OptionStarted);
        self.option_seq
    }

    pub fn complete_option(&mut self, seq: u64, result: Result<String, ClientError>) -> bool {
        if seq != self.option_seq {
            debug!(seq, latest = self.option_seq, "dropping stale option completion");
            return false;
        }
        let event = match result {
            Ok(action) => PanelEvent::OptionApplied { action },
            Err(error) => PanelEvent::RequestFailed {
                message: error.to_string(),
            },
        };
        reduce(&mut self.panel, event);
        true
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
