use std::sync::Arc;

use machine::BrewMechanism;
use shared::{
    domain::{CoffeeKind, OptionCommand},
    error::{ApiError, ErrorCode},
    protocol::BrewResponseWire,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// One mechanism per server process; there is a single machine in the
/// virtual kitchen and every request goes through it.
#[derive(Clone)]
pub struct ApiContext {
    pub machine: Arc<Mutex<BrewMechanism>>,
}

impl ApiContext {
    pub fn new() -> ApiContext {
        ApiContext {
            machine: Arc::new(Mutex::new(BrewMechanism::new())),
        }
    }
}

impl Default for ApiContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles `method=make_coffee`. An unknown coffee type is a validation
/// error; a machine that cannot brew answers with its problem text rather
/// than an error, since the page recovers from it in place.
pub async fn brew_coffee(ctx: &ApiContext, coffee_type: &str) -> Result<BrewResponseWire, ApiError> {
    let kind: CoffeeKind = coffee_type
        .parse()
        .map_err(|_| ApiError::new(ErrorCode::Validation, format!("unknown coffee type '{coffee_type}'")))?;

    let mut machine = ctx.machine.lock().await;
    match machine.brew(kind) {
        Ok(image) => {
            info!(kind = kind.as_str(), image, "cup served");
            Ok(BrewResponseWire::image(image))
        }
        Err(problems) => {
            let text = problems.to_status_text();
            warn!(kind = kind.as_str(), problems = %text, "brew refused");
            Ok(BrewResponseWire::problem(text))
        }
    }
}

/// Handles an option control click, mapping the control's identifier to
/// its recovery operation.
pub async fn apply_option(ctx: &ApiContext, method: &str) -> Result<String, ApiError> {
    let command = OptionCommand::from_identifier(method)
        .ok_or_else(|| ApiError::new(ErrorCode::Validation, "NotImplemented method"))?;

    let mut machine = ctx.machine.lock().await;
    let action = match command {
        OptionCommand::BeansRefill => {
            machine.refill_beans();
            "Beans successfully refiled"
        }
        OptionCommand::WaterRefill => {
            machine.refill_water();
            "Water successfully refiled"
        }
        OptionCommand::MilkRefill => {
            machine.refill_milk();
            "Milk successfully refiled"
        }
        OptionCommand::TrashRemove => {
            machine.remove_trash();
            "Trash throw away"
        }
    };
    info!(method, action, "option applied");
    Ok(action.to_string())
}
