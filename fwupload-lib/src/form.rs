/// Controls of the firmware data form, in document order. Names may repeat.
#[derive(Debug, Default, Clone)]
pub struct DataForm {
    pub fields: Vec<(String, String)>,
}

impl DataForm {
    pub fn with_field(mut self, name: impl ToString, value: impl ToString) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    /// Parses `name=value`; a bare `name` becomes an empty field.
    pub fn add_pair(&mut self, pair: &str) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        self.fields.push((name.trim().to_string(), value.to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of controls, repeated names included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
