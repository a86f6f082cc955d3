//! Options for the cell cleaning pipeline.

/// Default cap on entity decoding rounds.
///
/// Double- and triple-encoded content from copy-pasted rich text needs a few
/// passes; the cap bounds worst-case cost on malformed fragments.
pub const DEFAULT_DECODE_ROUNDS: usize = 5;

/// Options controlling which pipeline stages run and how.
///
/// The default configuration is the full reference pipeline; toggles exist
/// for callers that only need part of it.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Decode HTML/XML character entities (repeated until stable).
    pub decode_entities: bool,

    /// Maximum entity decoding rounds before giving up on convergence.
    pub decode_rounds: usize,

    /// Remove `<style>` blocks and inline CSS declaration fragments.
    pub strip_styles: bool,

    /// Detect markup-bearing strings and extract their visible text.
    pub extract_markup: bool,

    /// Reflow whitespace and split glued casing/digit boundaries.
    pub normalize_spacing: bool,

    /// Fan rows out across threads when cleaning a whole table.
    ///
    /// Output is identical either way; cells are independent and results are
    /// collected positionally.
    pub parallel: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            decode_entities: true,
            decode_rounds: DEFAULT_DECODE_ROUNDS,
            strip_styles: true,
            extract_markup: true,
            normalize_spacing: true,
            parallel: true,
        }
    }
}

impl CleanOptions {
    /// Creates options with default settings (the full pipeline).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for minimal cleanup: invisible-character scrubbing
    /// and entity decoding only, no markup extraction or respacing.
    pub fn minimal() -> Self {
        Self {
            decode_entities: true,
            decode_rounds: DEFAULT_DECODE_ROUNDS,
            strip_styles: false,
            extract_markup: false,
            normalize_spacing: false,
            parallel: true,
        }
    }

    /// Sets the entity decoding round cap.
    pub fn with_decode_rounds(mut self, rounds: usize) -> Self {
        self.decode_rounds = rounds;
        self
    }

    /// Disables entity decoding.
    pub fn without_entity_decoding(mut self) -> Self {
        self.decode_entities = false;
        self
    }

    /// Disables style block and CSS fragment removal.
    pub fn without_style_stripping(mut self) -> Self {
        self.strip_styles = false;
        self
    }

    /// Disables markup detection and visible-text extraction.
    pub fn without_markup_extraction(mut self) -> Self {
        self.extract_markup = false;
        self
    }

    /// Disables spacing normalization.
    pub fn without_spacing(mut self) -> Self {
        self.normalize_spacing = false;
        self
    }

    /// Disables parallel row fan-out.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
