use super::block::Block;
use super::paragraph::Paragraph;
use super::Twips;

/// How a section begins relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakType {
    Continuous,
    #[default]
    NextPage,
    EvenPage,
    OddPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page layout for one section. All lengths are twips; the defaults are
/// US Letter with one-inch margins and half-inch header/footer
/// distances.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionProperties {
    pub page_width: Twips,
    pub page_height: Twips,
    pub margin_top: Twips,
    pub margin_bottom: Twips,
    pub margin_left: Twips,
    pub margin_right: Twips,
    pub header_distance: Twips,
    pub footer_distance: Twips,
    pub orientation: Orientation,
    pub break_type: BreakType,
    pub different_first_page: bool,
    pub different_odd_even: bool,
}

impl Default for SectionProperties {
    fn default() -> Self {
        Self {
            page_width: 12240,
            page_height: 15840,
            margin_top: 1440,
            margin_bottom: 1440,
            margin_left: 1440,
            margin_right: 1440,
            header_distance: 720,
            footer_distance: 720,
            orientation: Orientation::Portrait,
            break_type: BreakType::NextPage,
            different_first_page: false,
            different_odd_even: false,
        }
    }
}

/// Content of one header or footer part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFooter {
    pub paragraphs: Vec<Paragraph>,
}

/// The up-to-three headers (or footers) a section can carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFooterSet {
    pub default: Option<HeaderFooter>,
    pub first: Option<HeaderFooter>,
    pub even: Option<HeaderFooter>,
}

impl HeaderFooterSet {
    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.first.is_none() && self.even.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub blocks: Vec<Block>,
    pub properties: SectionProperties,
    pub headers: HeaderFooterSet,
    pub footers: HeaderFooterSet,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraphs in document order: top-level blocks first to last,
    /// with each table contributing its cell paragraphs at the table's
    /// position.
    pub fn paragraphs(&self) -> Vec<&Paragraph> {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => out.push(p),
                Block::Table(t) => out.extend(t.paragraphs()),
            }
        }
        out
    }
}
