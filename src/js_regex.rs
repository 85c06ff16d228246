use std::fmt;

#[derive(Debug, Clone)]
pub(crate) struct Regex {
    backend: fancy_regex::Regex,
}

impl Regex {
    pub(crate) fn is_match(&self, input: &str) -> Result<bool, RegexError> {
        self.backend.is_match(input).map_err(RegexError::from)
    }
}

/// JavaScript `RegExp` flag letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct RegexFlags {
    pub(crate) case_insensitive: bool,
    pub(crate) multi_line: bool,
    pub(crate) dot_matches_new_line: bool,
}

impl RegexFlags {
    /// `g`, `y` and `u` are accepted but do not change a single `test`.
    pub(crate) fn parse(modifiers: &str) -> Result<Self, RegexError> {
        let mut flags = Self::default();
        let mut seen = String::new();
        for ch in modifiers.chars() {
            if seen.contains(ch) {
                return Err(RegexError::new(format!("repeated flag '{ch}'")));
            }
            seen.push(ch);
            match ch {
                'i' => flags.case_insensitive = true,
                'm' => flags.multi_line = true,
                's' => flags.dot_matches_new_line = true,
                'g' | 'y' | 'u' => {}
                other => return Err(RegexError::new(format!("unknown flag '{other}'"))),
            }
        }
        Ok(flags)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RegexBuilder {
    pattern: String,
    flags: RegexFlags,
}

impl RegexBuilder {
    pub(crate) fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            flags: RegexFlags::default(),
        }
    }

    pub(crate) fn flags(&mut self, flags: RegexFlags) -> &mut Self {
        self.flags = flags;
        self
    }

    pub(crate) fn build(&self) -> Result<Regex, RegexError> {
        let mut builder = fancy_regex::RegexBuilder::new(&self.pattern);
        builder.case_insensitive(self.flags.case_insensitive);
        builder.multi_line(self.flags.multi_line);
        builder.dot_matches_new_line(self.flags.dot_matches_new_line);
        let backend = builder.build().map_err(RegexError::from)?;
        Ok(Regex { backend })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RegexError {
    message: String,
}

impl RegexError {
    fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RegexError {}

impl From<fancy_regex::Error> for RegexError {
    fn from(value: fancy_regex::Error) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_builder_options() -> Result<(), RegexError> {
        let flags = RegexFlags::parse("gim")?;
        assert!(flags.case_insensitive);
        assert!(flags.multi_line);
        assert!(!flags.dot_matches_new_line);
        Ok(())
    }

    #[test]
    fn unknown_and_repeated_flags_are_rejected() {
        assert!(RegexFlags::parse("x").is_err());
        assert!(RegexFlags::parse("ii").is_err());
    }

    #[test]
    fn case_insensitive_build_matches_upper_case() -> Result<(), RegexError> {
        let mut builder = RegexBuilder::new(r"^a-\d$");
        builder.flags(RegexFlags::parse("i")?);
        let regex = builder.build()?;
        assert!(regex.is_match("A-1")?);
        Ok(())
    }
}
