/// One round's question, produced by the question factory.
///
/// Owned by the session engine for the duration of the round only.
#[derive(Debug, Clone)]
pub struct QuizQuestion {
    /// Resolved poster bytes.
    pub image: Vec<u8>,
    /// Question text, including the randomized threshold.
    pub text: String,
    /// Whether "yes" is the right answer.
    pub correct_answer: bool,
}

/// Display-ready projection of a [`QuizQuestion`].
///
/// Derived per round, never stored.
#[derive(Debug, Clone)]
pub struct QuizStep {
    /// Poster bytes for the presentation layer to render.
    pub image: Vec<u8>,
    /// Question text.
    pub question: String,
    /// Round counter label, e.g. `"3/10"`.
    pub round_label: String,
}
