pub trait Preprocessor {
    /// Trim the query and fold runs of whitespace (including newlines) into single spaces
    fn process(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
