mod quiz_vm;
mod timer_fmt;

pub use quiz_vm::{OptionMark, OptionView, QuizIntent, QuizVm, TimerView};
pub use timer_fmt::{fill_percent, progress_percent};
