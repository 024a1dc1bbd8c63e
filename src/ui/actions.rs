//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 分页
    PrevPage,
    NextPage,
    GoToPage(usize),
    SelectPageButton(usize), // 页码窗口中的第 n 个按钮

    // 触发特定功能
    FocusForm,
    StartEdit,
    StartDelete,

    // 表单/通用交互
    NextField,
    PrevField,
    Cancel,      // Esc / n
    Submit,      // Enter / y
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
