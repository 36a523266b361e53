/// User-intent actions produced by the input mapper.
///
/// Actions are screen-agnostic; `App::update` interprets them against the
/// current screen and any active modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Movement
    MoveDown,
    MoveUp,
    MoveLeft,
    MoveRight,
    PageDown,
    PageUp,
    GoTop,
    GoBottom,

    /// Enter — activate the item under the cursor.
    Confirm,
    /// Esc — leave the current screen / dismiss the current modal.
    NavigateBack,
    /// Tab — next pane, field, or section depending on screen.
    NextSection,
    /// Digit keys 1-9 — pick an answer option directly (0-based).
    SelectIndex(usize),
    /// n — advance to the next question; doubles as "discard" in the
    /// unsaved-settings prompt.
    NextQuestion,

    // Screen openers
    AddDocuments,
    OpenSettings,
    OpenHistory,
    ToggleHelp,

    StartGeneration,
    ToggleSelect,
    /// c — continue from the upload screen to quiz setup.
    Continue,
    /// y — confirm in yes/no prompts.
    Affirm,
    SaveSettings,

    // Search / text entry
    StartSearch,
    SearchInput(char),
    SearchConfirm,
    SearchCancel,

    Resize(u16, u16),
    Tick,
    None,
}
