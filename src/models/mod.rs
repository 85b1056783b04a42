mod movie;
mod question;
mod result;

pub use movie::Movie;
pub use question::{QuizQuestion, QuizStep};
pub use result::GameResult;
