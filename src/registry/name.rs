use std::fmt;

use super::RegistryError;

/// Characters that force a value to be written in quoted form.
const SPECIAL: [char; 8] = [',', '=', ':', '"', '*', '?', '\n', '\\'];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Value {
    Literal(String),
    /// An unquoted `*` in a pattern.
    Any,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Any => write!(f, "*"),
            Value::Literal(value) if value.contains(SPECIAL) => write!(f, "{}", quote(value)),
            Value::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// `"..."` with `\`, `"`, `*`, `?` and newlines escaped.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\n' => quoted.push_str("\\n"),
            '\\' | '"' | '*' | '?' => {
                quoted.push('\\');
                quoted.push(c);
            }
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Name of a managed resource: `domain:key=value[,key=value...]`.
///
/// A name is a pattern when a value is `*` or when the key list carries a
/// trailing `*`, which admits names with additional keys. Values holding any
/// of `,=:"*?`, a backslash or a newline are written quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    domain: String,
    properties: Vec<(String, Value)>,
    property_pattern: bool,
}

impl ObjectName {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            properties: Vec::new(),
            property_pattern: false,
        }
    }

    /// Adds or replaces a key. The value is taken literally, never as a wildcard.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = Value::Literal(value.into());
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.properties.push((key, value)),
        }
        self
    }

    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        Self::parse_keys(name).map_err(|reason| RegistryError::MalformedName {
            name: name.to_string(),
            reason,
        })
    }

    fn parse_keys(name: &str) -> Result<Self, &'static str> {
        let (domain, mut rest) = name.split_once(':').ok_or("missing ':'")?;
        if domain.is_empty() {
            return Err("empty domain");
        }

        let mut parsed = ObjectName::new(domain);
        loop {
            if rest == "*" || rest.starts_with("*,") {
                parsed.property_pattern = true;
                rest = &rest[1..];
            } else {
                let (key, after_key) = rest.split_once('=').ok_or("key property without '='")?;
                if key.is_empty() {
                    return Err("empty key");
                }
                if key.contains(SPECIAL) {
                    return Err("invalid character in key");
                }
                if parsed.key(key).is_some() {
                    return Err("duplicate key");
                }

                let (value, after_value) = parse_value(after_key)?;
                parsed.properties.push((key.to_string(), value));
                rest = after_value;
            }

            match rest.strip_prefix(',') {
                Some(next) => rest = next,
                None if rest.is_empty() => break,
                None => return Err("text after quoted value"),
            }
        }

        if parsed.properties.is_empty() && !parsed.property_pattern {
            return Err("no key properties");
        }
        Ok(parsed)
    }

    pub fn key(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| match value {
                Value::Literal(value) => value.as_str(),
                Value::Any => "*",
            })
    }

    pub fn is_pattern(&self) -> bool {
        self.property_pattern || self.properties.iter().any(|(_, v)| *v == Value::Any)
    }

    /// Keys sorted lexically, so equal names always render the same way.
    pub fn canonical_name(&self) -> String {
        let mut properties: Vec<&(String, Value)> = self.properties.iter().collect();
        properties.sort();

        let keys: Vec<String> = properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!("{}:{}", self.domain, keys.join(","))
    }

    pub fn matches(&self, candidate: &ObjectName) -> bool {
        if self.domain != candidate.domain {
            return false;
        }

        let keys_match = self.properties.iter().all(|(key, value)| {
            match (value, candidate.properties.iter().find(|(k, _)| k == key)) {
                (_, None) => false,
                (Value::Any, Some(_)) => true,
                (Value::Literal(_), Some((_, found))) => value == found,
            }
        });

        keys_match && (self.property_pattern || self.properties.len() == candidate.properties.len())
    }
}

/// Reads one value up to the next `,` (or the closing quote), returning the
/// rest of the input.
fn parse_value(input: &str) -> Result<(Value, &str), &'static str> {
    let Some(quoted) = input.strip_prefix('"') else {
        let end = input.find(',').unwrap_or(input.len());
        let raw = &input[..end];
        return match raw {
            "*" => Ok((Value::Any, &input[end..])),
            _ if raw.contains(SPECIAL) => Err("value must be quoted"),
            _ => Ok((Value::Literal(raw.to_string()), &input[end..])),
        };
    };

    let mut value = String::new();
    let mut chars = quoted.char_indices();
    while let Some((index, c)) = chars.next() {
        match c {
            '"' => return Ok((Value::Literal(value), &quoted[index + 1..])),
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, escaped @ ('\\' | '"' | '*' | '?'))) => value.push(escaped),
                _ => return Err("invalid escape in quoted value"),
            },
            _ => value.push(c),
        }
    }
    Err("unterminated quoted value")
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.domain)?;

        let mut first = true;
        for (key, value) in &self.properties {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }

        if self.property_pattern {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "*")?;
        }
        Ok(())
    }
}
