//! The control panel as an explicit finite-state value. Rather than
//! toggling per-control enablement from inside completion callbacks,
//! every mutation goes through [`reduce`] so the enablement rules live
//! in one place.

/// Which side of the panel accepts clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    /// Trigger enabled, option controls disabled.
    Ready,
    /// The machine reported problems: trigger disabled, options enabled
    /// until a recovery command succeeds.
    NeedsOptions,
}

/// What the output region shows after a served cup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedCup {
    Image(String),
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanel {
    pub phase: PanelPhase,
    pub busy: bool,
    pub status_text: String,
    pub output: Option<RenderedCup>,
    pub last_action: Option<String>,
    pub error: Option<String>,
}

impl ControlPanel {
    pub fn new() -> ControlPanel {
        ControlPanel {
            phase: PanelPhase::Ready,
            busy: false,
            status_text: String::new(),
            output: None,
            last_action: None,
            error: None,
        }
    }

    pub fn trigger_enabled(&self) -> bool {
        self.phase == PanelPhase::Ready && !self.busy
    }

    pub fn options_enabled(&self) -> bool {
        self.phase == PanelPhase::NeedsOptions && !self.busy
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    BrewStarted,
    /// The machine refused to brew; `problems` is the status text.
    BrewFailed { problems: String },
    CupServed { cup: RenderedCup },
    OptionStarted,
    OptionApplied { action: String },
    /// Transport, HTTP-status or payload failure of either request kind.
    RequestFailed { message: String },
}

pub fn reduce(panel: &mut ControlPanel, event: PanelEvent) {
    match event {
        PanelEvent::BrewStarted | PanelEvent::OptionStarted => {
            panel.busy = true;
            panel.error = None;
        }
        PanelEvent::BrewFailed { problems } => {
            panel.busy = false;
            panel.status_text = problems;
            panel.phase = PanelPhase::NeedsOptions;
        }
        PanelEvent::CupServed { cup } => {
            panel.busy = false;
            panel.phase = PanelPhase::Ready;
            panel.output = Some(cup);
        }
        PanelEvent::OptionApplied { action } => {
            panel.busy = false;
            panel.status_text.clear();
            panel.phase = PanelPhase::Ready;
            panel.last_action = Some(action);
        }
        PanelEvent::RequestFailed { message } => {
            panel.busy = false;
            panel.error = Some(message);
        }
    }
}
