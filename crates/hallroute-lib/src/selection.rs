use crate::grid::ENTRANCE_CODE;

/// Split free-form selection text on newlines and commas, trimming each code
/// and dropping empty entries.
pub fn parse_selection(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_entrance(code: &str) -> bool {
    code.eq_ignore_ascii_case(ENTRANCE_CODE)
}

/// Ordered set of distinct booth codes chosen by the visitor. The entrance is
/// never a stop and is filtered out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopSet {
    codes: Vec<String>,
}

impl StopSet {
    /// Build a stop set, keeping the first occurrence of each code.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for code in codes {
            set.insert(code.into());
        }
        set
    }

    /// Add a code; returns `false` if it was already selected or is the entrance.
    pub fn insert(&mut self, code: String) -> bool {
        if is_entrance(&code) || self.contains(&code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    /// Select the code if absent, deselect it if present. The entrance is
    /// ignored. Returns whether the code is selected afterwards.
    pub fn toggle(&mut self, code: &str) -> bool {
        if is_entrance(code) {
            return false;
        }
        if let Some(position) = self.codes.iter().position(|c| c == code) {
            self.codes.remove(position);
            false
        } else {
            self.codes.push(code.to_string());
            true
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.codes
    }

    pub fn into_vec(self) -> Vec<String> {
        self.codes
    }
}
