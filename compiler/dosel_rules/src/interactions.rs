use std::collections::HashMap;

/// Free-text notes for unordered drug pairs.
///
/// Pairs are stored lower-cased and sorted, so lookups ignore both case and
/// argument order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionTable {
    notes: HashMap<(String, String), String>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl InteractionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, a: &str, b: &str, note: impl Into<String>) {
        self.notes.insert(pair_key(a, b), note.into());
    }

    pub fn lookup(&self, a: &str, b: &str) -> Option<&str> {
        self.notes.get(&pair_key(a, b)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_order_and_case_insensitive() {
        let mut table = InteractionTable::new();
        table.insert("losartan", "ibuprofen", "caution");
        assert_eq!(table.lookup("ibuprofen", "losartan"), Some("caution"));
        assert_eq!(table.lookup("LOSARTAN", "Ibuprofen"), Some("caution"));
        assert_eq!(table.lookup("losartan", "metformin"), None);
        assert_eq!(table.len(), 1);
    }
}
