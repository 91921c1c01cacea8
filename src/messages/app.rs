use crate::app::App;

#[derive(Debug)]
pub enum AppCommand {
    Bootstrap,
    Quit,
    TabNext,
    TabPrev,
    TabTo { index: usize },
    ToggleHelp,
    /// Esc: closes the innermost input, modal or pane.
    Back,
    Logout,

    /// Routed to whichever text field is active.
    InputChar { c: char },
    InputBackspace,
    InputSubmit,
    /// `back` walks the form upwards.
    LoginSwitchField { back: bool },
    /// Flips the form between logging in and creating an account.
    LoginToggleMode,

    DashboardRefresh,

    PlaylistsMoveUp,
    PlaylistsMoveDown,
    PlaylistsOpenSelected,
    PlaylistsReload,
    PlaylistsStartImport,
    PlaylistsExportCsv,
    PlaylistsOpenTransfer,

    PickerMoveUp,
    PickerMoveDown,
    PickerImport,
    PickerReload,
    /// Leaves the picker for the paste-a-link input.
    PickerPasteLink,

    TransferModalRefresh,
    TransferModalCancelJob,

    TransfersMoveUp,
    TransfersMoveDown,
    TransfersOpenDetail,
    TransfersRefreshProgress,
    TransfersCancelSelected,
    TransfersReload,

    AccountsMoveUp,
    AccountsMoveDown,
    AccountsActivate,
    AccountsSpotifyAuthUrl,
    AccountsDisconnect,
    AccountsTestYouTube,
    AccountsRefresh,
}

#[derive(Debug)]
pub enum AppEvent {
    State(Box<App>),
    Toast(String),
    Error(String),
}
