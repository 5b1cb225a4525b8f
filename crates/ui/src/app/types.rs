#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Library,
    Reader,
    Login,
    Register,
    History,
    Profile,
    AddBook,
}

#[derive(Clone, Copy, Debug)]
pub(super) enum Command {
    Exit,
    Cancel,
    Submit,
    FocusNext,
    FocusPrev,
    Insert(char),
    Backspace,
    MoveUp,
    MoveDown,
    NextListPage,
    PrevListPage,
    StartSearch,
    StartAuthorFilter,
    CycleSort,
    OpenSelected,
    OpenLogin,
    OpenRegister,
    OpenHistory,
    OpenProfile,
    OpenAddBook,
    Logout,
    PageForward,
    PageBackward,
    StartJump,
    CycleTheme,
    CycleFontSize,
    CycleOption,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandOutcome {
    Continue,
    Exit,
}
