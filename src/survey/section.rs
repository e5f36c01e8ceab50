/// An ordered, titled group of fields shown together as one step of the form.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    /// 1-based position.
    pub ordinal: usize,
    pub title: &'static str,
    pub fields: &'static [&'static str],
}
