use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Commands accepted on the control socket, one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ControlCommand {
    Show,
    Start,
    Pause,
    Toggle,
    Reset,
    Skip,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Control(ControlCommand),
    Tick,
    ConfigReload,
}

impl From<ControlCommand> for AppEvent {
    fn from(cmd: ControlCommand) -> Self {
        AppEvent::Control(cmd)
    }
}
