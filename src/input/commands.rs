use crate::models::TaskStatus;

/// Application command enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // ===== Exit =====
    Quit,

    // ===== Views =====
    /// Show the Eisenhower matrix
    ShowMatrix,
    /// Show the kanban board
    ShowBoard,
    /// Flip between the two views
    ToggleView,

    // ===== Navigation =====
    /// Select the column or quadrant to the left
    ColumnLeft,
    /// Select the column or quadrant to the right
    ColumnRight,
    /// Select the previous task in the column
    RowUp,
    /// Select the next task in the column
    RowDown,

    // ===== Task operations =====
    /// Open the form for a new task
    NewTask,
    /// Open the form for the selected task
    EditTask,
    /// Ask to delete the selected task
    DeleteTask,
    /// Move the selected task one board column left
    MoveTaskLeft,
    /// Move the selected task one board column right
    MoveTaskRight,
    /// Send the selected task straight to a column
    SendTo(TaskStatus),

    // ===== Matrix controls =====
    /// Tick or untick a status in the matrix filter
    ToggleFilter(TaskStatus),
    /// Cycle the urgency threshold through the presets
    CycleThreshold,
    /// Raise the threshold by one day
    ThresholdUp,
    /// Lower the threshold by one day
    ThresholdDown,
    /// Type a custom threshold
    EnterThresholdInput,

    // ===== Overlays =====
    /// Show the key cheatsheet
    ShowHelp,
}
