#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Reset,
    Confirm,
    ConfigReload,
}
