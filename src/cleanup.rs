//! Cleanup of raw recognizer output.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Unicode NFC normalization, control characters, trailing whitespace
    Minimal,
    /// Minimal plus ligatures, replacement characters, blank-line runs
    #[default]
    Standard,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Expand typographic ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Remove form feeds and other control characters except tab and newline
    pub remove_control_chars: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Strip spaces and tabs at line ends
    pub trim_line_ends: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: false,
            remove_control_chars: true,
            remove_replacement_char: false,
            trim_line_ends: true,
            max_consecutive_newlines: 0,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            remove_control_chars: true,
            remove_replacement_char: true,
            trim_line_ends: true,
            max_consecutive_newlines: 2,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone)]
pub struct CleanupPipeline {
    options: CleanupOptions,
    line_end_regex: Regex,
    newline_run_regex: Option<Regex>,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        let newline_run_regex = match options.max_consecutive_newlines {
            0 => None,
            n => Regex::new(&format!(r"\n{{{},}}", u32::from(n) + 1)).ok(),
        };
        Self {
            line_end_regex: Regex::new(r"(?m)[ \t]+$").expect("line-end pattern is valid"),
            newline_run_regex,
            ligature_map: vec![
                ("\u{FB00}", "ff"),
                ("\u{FB01}", "fi"),
                ("\u{FB02}", "fl"),
                ("\u{FB03}", "ffi"),
                ("\u{FB04}", "ffl"),
                ("\u{FB05}", "st"),
                ("\u{FB06}", "st"),
            ],
            options,
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect::<String>()
        } else {
            text.to_string()
        };

        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.remove_control_chars {
            result = result.replace("\r\n", "\n");
            result.retain(|c| !c.is_control() || c == '\n' || c == '\t');
        }

        if self.options.remove_replacement_char {
            result.retain(|c| c != '\u{FFFD}');
        }

        if self.options.trim_line_ends {
            result = self.line_end_regex.replace_all(&result, "").into_owned();
        }

        if let Some(ref re) = self.newline_run_regex {
            let limit = "\n".repeat(usize::from(self.options.max_consecutive_newlines));
            result = re.replace_all(&result, limit.as_str()).into_owned();
        }

        result
    }
}
