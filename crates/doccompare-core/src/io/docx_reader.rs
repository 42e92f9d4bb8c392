//! DOCX to model.
//!
//! Parses the parts the model cares about: the main document, numbering
//! and style definitions, headers/footers reachable from the section
//! properties, and the core properties. Unknown elements are skipped
//! rather than rejected; a malformed required part is the only fatal
//! condition.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use roxmltree::Node;

use crate::error::{CompareError, Result};
use crate::model::{
    Alignment, Block, BreakType, Document, DocumentProperties, HeaderFooter, HeaderFooterSet,
    LineRule, NumberFormat, NumberingDefinition, NumberingInfo, NumberingInstance, NumberingLevel,
    NumberingLevelOverride, Orientation, Paragraph, ParagraphStyle, Run, RunFormatting, Section,
    SectionProperties, StyleDefinition, StyleType, Table, TableCell, TableProperties, TableRow,
    WidthType,
};

use super::package::OoxmlPackage;
use super::DocumentParser;

pub(crate) const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const R_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CP_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
const DCTERMS_NS: &str = "http://purl.org/dc/terms/";

pub struct DocxParser;

impl DocumentParser for DocxParser {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn parse_path(&self, path: &Path) -> Result<Document> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes).map_err(|e| match e {
            CompareError::Io(_) | CompareError::Zip(_) | CompareError::XmlParse { .. } => {
                CompareError::ParseFailure {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
            other => other,
        })
    }

    fn parse_stream(&self, reader: &mut dyn Read, filename_hint: &str) -> Result<Document> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes).map_err(|e| CompareError::ParseFailure {
            path: filename_hint.to_string(),
            message: e.to_string(),
        })
    }
}

impl DocxParser {
    /// Parse a complete package from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Document> {
        let package = OoxmlPackage::open(bytes)?;
        let mut document = Document::new();

        if let Some(core) = package.part("docProps/core.xml") {
            document.properties = parse_core_properties(core)?;
        }

        if let Some(numbering) = package.part("word/numbering.xml") {
            let (definitions, instances) = parse_numbering(numbering)?;
            document.numbering_definitions = definitions;
            document.numbering_instances = instances;
        }

        if let Some(styles) = package.part("word/styles.xml") {
            let (style_definitions, default_font, default_size) = parse_styles(styles)?;
            document.styles = style_definitions;
            document.properties.default_font = default_font;
            document.properties.default_font_size = default_size;
        }

        let relationships = parse_relationships(&package)?;
        let main = package.required_part("word/document.xml")?;
        document.sections = parse_document_body(main, &package, &relationships)?;

        Ok(document)
    }
}

fn parse_xml(bytes: &[u8], location: &str) -> Result<String> {
    // roxmltree borrows the input, so callers keep the string alive and
    // re-parse from it. Validate UTF-8 here once.
    String::from_utf8(bytes.to_vec()).map_err(|e| CompareError::XmlParse {
        message: e.to_string(),
        location: location.to_string(),
    })
}

fn parse_tree<'a>(text: &'a str, location: &str) -> Result<roxmltree::Document<'a>> {
    roxmltree::Document::parse_with_options(
        text,
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )
    .map_err(|e| CompareError::XmlParse {
        message: e.to_string(),
        location: format!("{location} line {}", e.pos().row),
    })
}

fn is_w(node: &Node, local: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local
        && node.tag_name().namespace() == Some(W_NS)
}

/// `w:val`-style attribute lookup; tolerates missing namespace on the
/// attribute, which some producers emit.
fn wattr<'a>(node: &Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute((W_NS, name)).or_else(|| node.attribute(name))
}

fn wval<'a>(node: &Node<'a, '_>) -> Option<&'a str> {
    wattr(node, "val")
}

/// OOXML on/off: absent value means on; "0"/"false"/"none" mean off.
fn on_off(node: &Node) -> bool {
    match wval(node) {
        None => true,
        Some(v) => !matches!(v, "0" | "false" | "none"),
    }
}

fn parse_relationships(package: &OoxmlPackage) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    let Some(bytes) = package.part("word/_rels/document.xml.rels") else {
        return Ok(map);
    };

    let text = parse_xml(bytes, "word/_rels/document.xml.rels")?;
    let tree = parse_tree(&text, "word/_rels/document.xml.rels")?;

    for node in tree.root_element().children().filter(|n| {
        n.is_element()
            && n.tag_name().name() == "Relationship"
            && n.tag_name().namespace() == Some(REL_NS)
    }) {
        if let (Some(id), Some(target)) = (node.attribute("Id"), node.attribute("Target")) {
            map.insert(id.to_string(), target.to_string());
        }
    }

    Ok(map)
}

fn parse_document_body(
    bytes: &[u8],
    package: &OoxmlPackage,
    relationships: &HashMap<String, String>,
) -> Result<Vec<Section>> {
    let text = parse_xml(bytes, "word/document.xml")?;
    let tree = parse_tree(&text, "word/document.xml")?;

    let body = tree
        .root_element()
        .children()
        .find(|n| is_w(n, "body"))
        .ok_or_else(|| CompareError::XmlParse {
            message: "document has no body".to_string(),
            location: "word/document.xml".to_string(),
        })?;

    let mut sections = Vec::new();
    let mut blocks: Vec<Block> = Vec::new();

    for child in body.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "p" if child.tag_name().namespace() == Some(W_NS) => {
                let (paragraph, section_break) = parse_paragraph(&child);
                blocks.push(Block::Paragraph(paragraph));

                // A paragraph-level sectPr closes the section it ends.
                if let Some(sect_pr) = section_break {
                    let (properties, headers, footers) =
                        parse_section_properties(&sect_pr, package, relationships)?;
                    sections.push(Section {
                        blocks: std::mem::take(&mut blocks),
                        properties,
                        headers,
                        footers,
                    });
                }
            }
            "tbl" if child.tag_name().namespace() == Some(W_NS) => {
                blocks.push(Block::Table(parse_table(&child)));
            }
            "sectPr" if child.tag_name().namespace() == Some(W_NS) => {
                let (properties, headers, footers) =
                    parse_section_properties(&child, package, relationships)?;
                sections.push(Section {
                    blocks: std::mem::take(&mut blocks),
                    properties,
                    headers,
                    footers,
                });
            }
            _ => {}
        }
    }

    if !blocks.is_empty() || sections.is_empty() {
        sections.push(Section {
            blocks,
            ..Default::default()
        });
    }

    Ok(sections)
}

/// Parse a `w:p`, returning the paragraph and, when the paragraph ends
/// a section, its `w:sectPr` node.
fn parse_paragraph<'a, 'input>(
    node: &Node<'a, 'input>,
) -> (Paragraph, Option<Node<'a, 'input>>) {
    let mut paragraph = Paragraph::new();
    let mut section_break = None;

    if let Some(id) = node
        .attributes()
        .find(|a| a.name() == "paraId")
        .map(|a| a.value())
    {
        paragraph.id = Some(id.to_string());
    }

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "pPr" => {
                let (style, numbering) = parse_paragraph_properties(&child);
                paragraph.style = style;
                paragraph.numbering = numbering;
                if let Some(sect_pr) = child.children().find(|n| is_w(n, "sectPr")) {
                    section_break = Some(sect_pr);
                }
            }
            "r" => {
                if let Some(run) = parse_run(&child) {
                    paragraph.runs.push(run);
                }
            }
            "hyperlink" => {
                // Flatten hyperlink content into plain runs.
                for inner in child.children().filter(|n| is_w(n, "r")) {
                    if let Some(run) = parse_run(&inner) {
                        paragraph.runs.push(run);
                    }
                }
            }
            "bookmarkStart" => {
                let id = wattr(&child, "name")
                    .or_else(|| wattr(&child, "id"))
                    .unwrap_or_default();
                if !id.is_empty() {
                    paragraph.bookmark_starts.insert(id.to_string());
                }
            }
            "bookmarkEnd" => {
                if let Some(id) = wattr(&child, "id") {
                    paragraph.bookmark_ends.insert(id.to_string());
                }
            }
            _ => {}
        }
    }

    (paragraph, section_break)
}

fn parse_paragraph_properties(node: &Node) -> (ParagraphStyle, Option<NumberingInfo>) {
    let mut style = ParagraphStyle::default();
    let mut numbering = None;

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "pStyle" => {
                if let Some(id) = wval(&child) {
                    style.style_id = Some(id.to_string());
                    style.heading_level = heading_level_of(id);
                }
            }
            "jc" => {
                if let Some(v) = wval(&child) {
                    style.alignment = parse_alignment(v);
                }
            }
            "ind" => {
                if let Some(v) = wattr(&child, "left").and_then(|v| v.parse().ok()) {
                    style.indent_left = v;
                }
                if let Some(v) = wattr(&child, "right").and_then(|v| v.parse().ok()) {
                    style.indent_right = v;
                }
                if let Some(v) = wattr(&child, "firstLine").and_then(|v| v.parse::<i32>().ok()) {
                    style.indent_first_line = v;
                }
                if let Some(v) = wattr(&child, "hanging").and_then(|v| v.parse::<i32>().ok()) {
                    // Hanging indents are stored positive; the model
                    // encodes them as a negative first-line indent.
                    style.indent_first_line = -v;
                }
            }
            "spacing" => {
                if let Some(v) = wattr(&child, "before").and_then(|v| v.parse().ok()) {
                    style.spacing_before = v;
                }
                if let Some(v) = wattr(&child, "after").and_then(|v| v.parse().ok()) {
                    style.spacing_after = v;
                }
                if let Some(v) = wattr(&child, "line").and_then(|v| v.parse().ok()) {
                    style.line_spacing = v;
                }
                style.line_rule = match wattr(&child, "lineRule") {
                    Some("exact") => LineRule::Exact,
                    Some("atLeast") => LineRule::AtLeast,
                    _ => LineRule::Auto,
                };
            }
            "keepNext" => style.keep_with_next = on_off(&child),
            "keepLines" => style.keep_lines_together = on_off(&child),
            "pageBreakBefore" => style.page_break_before = on_off(&child),
            "outlineLvl" => {
                style.outline_level = wval(&child).and_then(|v| v.parse::<u8>().ok()).filter(|v| *v <= 8);
            }
            "numPr" => {
                let level = child
                    .children()
                    .find(|n| is_w(n, "ilvl"))
                    .and_then(|n| wval(&n))
                    .and_then(|v| v.parse::<u8>().ok())
                    .unwrap_or(0);
                let instance_id = child
                    .children()
                    .find(|n| is_w(n, "numId"))
                    .and_then(|n| wval(&n))
                    .and_then(|v| v.parse::<u32>().ok());
                if let Some(instance_id) = instance_id {
                    numbering = Some(NumberingInfo { instance_id, level });
                }
            }
            _ => {}
        }
    }

    (style, numbering)
}

fn heading_level_of(style_id: &str) -> Option<u8> {
    style_id
        .strip_prefix("Heading")
        .and_then(|rest| rest.parse::<u8>().ok())
        .filter(|level| (1..=9).contains(level))
}

fn parse_alignment(value: &str) -> Alignment {
    match value {
        "center" => Alignment::Center,
        "right" | "end" => Alignment::Right,
        "both" | "justify" | "distribute" => Alignment::Justify,
        _ => Alignment::Left,
    }
}

fn parse_run(node: &Node) -> Option<Run> {
    let mut text = String::new();
    let mut formatting = RunFormatting::default();

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "rPr" => formatting = parse_run_properties(&child),
            "t" => {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            "noBreakHyphen" => text.push('\u{2011}'),
            _ => {}
        }
    }

    if text.is_empty() {
        return None;
    }
    Some(Run { text, formatting })
}

fn parse_run_properties(node: &Node) -> RunFormatting {
    let mut formatting = RunFormatting::default();

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "b" => formatting.bold = on_off(&child),
            "i" => formatting.italic = on_off(&child),
            "u" => {
                formatting.underline = !matches!(wval(&child), Some("none"));
            }
            "strike" => formatting.strikethrough = on_off(&child),
            "vertAlign" => match wval(&child) {
                Some("superscript") => formatting.superscript = true,
                Some("subscript") => formatting.subscript = true,
                _ => {}
            },
            "rFonts" => {
                formatting.font_family = wattr(&child, "ascii")
                    .or_else(|| wattr(&child, "hAnsi"))
                    .map(str::to_string);
            }
            "sz" => {
                // Half-points on the wire.
                formatting.font_size = wval(&child)
                    .and_then(|v| v.parse::<f32>().ok())
                    .map(|half| half / 2.0);
            }
            "color" => {
                formatting.color = wval(&child)
                    .filter(|v| *v != "auto")
                    .map(str::to_string);
            }
            "highlight" => {
                formatting.highlight = wval(&child).map(str::to_string);
            }
            "rStyle" => {
                formatting.style_id = wval(&child).map(str::to_string);
            }
            _ => {}
        }
    }

    formatting
}

fn parse_table(node: &Node) -> Table {
    let mut table = Table::default();

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "tblPr" => table.properties = parse_table_properties(&child),
            "tr" => {
                let mut row = TableRow::default();
                for cell_node in child.children().filter(|n| is_w(n, "tc")) {
                    let mut cell = TableCell::default();
                    for block in cell_node.children().filter(Node::is_element) {
                        match block.tag_name().name() {
                            "p" => {
                                let (paragraph, _) = parse_paragraph(&block);
                                cell.blocks.push(Block::Paragraph(paragraph));
                            }
                            "tbl" => cell.blocks.push(Block::Table(parse_table(&block))),
                            _ => {}
                        }
                    }
                    cell.ensure_paragraph();
                    row.cells.push(cell);
                }
                table.rows.push(row);
            }
            _ => {}
        }
    }

    table
}

fn parse_table_properties(node: &Node) -> TableProperties {
    let mut properties = TableProperties::default();

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "tblW" => {
                properties.width = wattr(&child, "w").and_then(|v| v.parse().ok());
                properties.width_type = match wattr(&child, "type") {
                    Some("dxa") => WidthType::Dxa,
                    Some("pct") => WidthType::Pct,
                    _ => WidthType::Auto,
                };
            }
            "jc" => {
                properties.alignment = wval(&child).map(parse_alignment);
            }
            _ => {}
        }
    }

    properties
}

fn parse_section_properties(
    node: &Node,
    package: &OoxmlPackage,
    relationships: &HashMap<String, String>,
) -> Result<(SectionProperties, HeaderFooterSet, HeaderFooterSet)> {
    let mut properties = SectionProperties::default();
    let mut headers = HeaderFooterSet::default();
    let mut footers = HeaderFooterSet::default();

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "pgSz" => {
                if let Some(v) = wattr(&child, "w").and_then(|v| v.parse().ok()) {
                    properties.page_width = v;
                }
                if let Some(v) = wattr(&child, "h").and_then(|v| v.parse().ok()) {
                    properties.page_height = v;
                }
                if wattr(&child, "orient") == Some("landscape") {
                    properties.orientation = Orientation::Landscape;
                }
            }
            "pgMar" => {
                if let Some(v) = wattr(&child, "top").and_then(|v| v.parse().ok()) {
                    properties.margin_top = v;
                }
                if let Some(v) = wattr(&child, "bottom").and_then(|v| v.parse().ok()) {
                    properties.margin_bottom = v;
                }
                if let Some(v) = wattr(&child, "left").and_then(|v| v.parse().ok()) {
                    properties.margin_left = v;
                }
                if let Some(v) = wattr(&child, "right").and_then(|v| v.parse().ok()) {
                    properties.margin_right = v;
                }
                if let Some(v) = wattr(&child, "header").and_then(|v| v.parse().ok()) {
                    properties.header_distance = v;
                }
                if let Some(v) = wattr(&child, "footer").and_then(|v| v.parse().ok()) {
                    properties.footer_distance = v;
                }
            }
            "type" => {
                properties.break_type = match wval(&child) {
                    Some("continuous") => BreakType::Continuous,
                    Some("evenPage") => BreakType::EvenPage,
                    Some("oddPage") => BreakType::OddPage,
                    _ => BreakType::NextPage,
                };
            }
            "titlePg" => properties.different_first_page = on_off(&child),
            "headerReference" | "footerReference" => {
                let kind = wattr(&child, "type").unwrap_or("default");
                let target = child
                    .attribute((R_NS, "id"))
                    .and_then(|id| relationships.get(id));
                let Some(target) = target else { continue };
                let content = parse_header_footer_part(package, target)?;

                let set = if child.tag_name().name() == "headerReference" {
                    &mut headers
                } else {
                    &mut footers
                };
                match kind {
                    "first" => set.first = Some(content),
                    "even" => set.even = Some(content),
                    _ => set.default = Some(content),
                }
            }
            _ => {}
        }
    }

    properties.different_odd_even = headers.even.is_some() || footers.even.is_some();

    Ok((properties, headers, footers))
}

fn parse_header_footer_part(package: &OoxmlPackage, target: &str) -> Result<HeaderFooter> {
    let path = if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else if target.starts_with("word/") {
        target.to_string()
    } else {
        format!("word/{target}")
    };

    let Some(bytes) = package.part(&path) else {
        return Ok(HeaderFooter::default());
    };

    let text = parse_xml(bytes, &path)?;
    let tree = parse_tree(&text, &path)?;

    let mut content = HeaderFooter::default();
    for child in tree.root_element().children().filter(|n| is_w(n, "p")) {
        let (paragraph, _) = parse_paragraph(&child);
        content.paragraphs.push(paragraph);
    }

    Ok(content)
}

fn parse_numbering(bytes: &[u8]) -> Result<(Vec<NumberingDefinition>, Vec<NumberingInstance>)> {
    let text = parse_xml(bytes, "word/numbering.xml")?;
    let tree = parse_tree(&text, "word/numbering.xml")?;

    let mut definitions = Vec::new();
    let mut instances = Vec::new();

    for node in tree.root_element().children().filter(Node::is_element) {
        match node.tag_name().name() {
            "abstractNum" => {
                let Some(id) = wattr(&node, "abstractNumId").and_then(|v| v.parse().ok()) else {
                    continue;
                };
                let mut definition = NumberingDefinition {
                    id,
                    ..Default::default()
                };

                for child in node.children().filter(Node::is_element) {
                    match child.tag_name().name() {
                        "name" => definition.name = wval(&child).map(str::to_string),
                        "multiLevelType" => {
                            definition.multi_level =
                                matches!(wval(&child), Some("multilevel") | Some("hybridMultilevel"));
                        }
                        "lvl" => {
                            if let Some(level) = parse_numbering_level(&child) {
                                definition.levels.push(level);
                            }
                        }
                        _ => {}
                    }
                }

                definitions.push(definition);
            }
            "num" => {
                let Some(id) = wattr(&node, "numId").and_then(|v| v.parse().ok()) else {
                    continue;
                };
                let mut instance = NumberingInstance::new(id, 0);

                for child in node.children().filter(Node::is_element) {
                    match child.tag_name().name() {
                        "abstractNumId" => {
                            if let Some(v) = wval(&child).and_then(|v| v.parse().ok()) {
                                instance.definition_id = v;
                            }
                        }
                        "lvlOverride" => {
                            let Some(level) =
                                wattr(&child, "ilvl").and_then(|v| v.parse::<u8>().ok())
                            else {
                                continue;
                            };
                            let start_override = child
                                .children()
                                .find(|n| is_w(n, "startOverride"))
                                .and_then(|n| wval(&n))
                                .and_then(|v| v.parse().ok());
                            let level_redefinition = child
                                .children()
                                .find(|n| is_w(n, "lvl"))
                                .and_then(|n| parse_numbering_level(&n));
                            instance.overrides.insert(
                                level,
                                NumberingLevelOverride {
                                    level,
                                    start_override,
                                    level_redefinition,
                                },
                            );
                        }
                        _ => {}
                    }
                }

                instances.push(instance);
            }
            _ => {}
        }
    }

    Ok((definitions, instances))
}

fn parse_numbering_level(node: &Node) -> Option<NumberingLevel> {
    let index = wattr(node, "ilvl").and_then(|v| v.parse::<u8>().ok())?;
    if index > 8 {
        return None;
    }

    let mut level = NumberingLevel::new(index);

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "numFmt" => {
                level.format = wval(&child)
                    .map(NumberFormat::from_ooxml)
                    .unwrap_or_default();
            }
            "lvlText" => {
                if let Some(v) = wval(&child) {
                    level.text = v.to_string();
                }
            }
            "start" => {
                if let Some(v) = wval(&child).and_then(|v| v.parse().ok()) {
                    level.start = v;
                }
            }
            "lvlJc" => {
                if let Some(v) = wval(&child) {
                    level.alignment = parse_alignment(v);
                }
            }
            "pPr" => {
                if let Some(ind) = child.children().find(|n| is_w(n, "ind")) {
                    level.indent = wattr(&ind, "left").and_then(|v| v.parse().ok());
                    level.hanging = wattr(&ind, "hanging").and_then(|v| v.parse().ok());
                }
            }
            "rPr" => {
                if let Some(fonts) = child.children().find(|n| is_w(n, "rFonts")) {
                    level.font = wattr(&fonts, "ascii")
                        .or_else(|| wattr(&fonts, "hAnsi"))
                        .map(str::to_string);
                }
            }
            _ => {}
        }
    }

    Some(level)
}

fn parse_styles(
    bytes: &[u8],
) -> Result<(Vec<StyleDefinition>, Option<String>, Option<f32>)> {
    let text = parse_xml(bytes, "word/styles.xml")?;
    let tree = parse_tree(&text, "word/styles.xml")?;

    let mut styles = Vec::new();
    let mut default_font = None;
    let mut default_size = None;

    for node in tree.root_element().children().filter(Node::is_element) {
        match node.tag_name().name() {
            "docDefaults" => {
                for rpr in node
                    .descendants()
                    .filter(|n| is_w(n, "rPr"))
                {
                    let formatting = parse_run_properties(&rpr);
                    if default_font.is_none() {
                        default_font = formatting.font_family;
                    }
                    if default_size.is_none() {
                        default_size = formatting.font_size;
                    }
                }
            }
            "style" => {
                let Some(id) = wattr(&node, "styleId") else { continue };
                let style_type = wattr(&node, "type")
                    .map(StyleType::from_ooxml)
                    .unwrap_or_default();
                let mut definition = StyleDefinition::new(id, style_type);

                for child in node.children().filter(Node::is_element) {
                    match child.tag_name().name() {
                        "name" => definition.name = wval(&child).map(str::to_string),
                        "basedOn" => definition.based_on = wval(&child).map(str::to_string),
                        "next" => definition.next_style = wval(&child).map(str::to_string),
                        "pPr" => {
                            let (style, _) = parse_paragraph_properties(&child);
                            definition.paragraph = Some(style);
                        }
                        "rPr" => definition.run = Some(parse_run_properties(&child)),
                        _ => {}
                    }
                }

                styles.push(definition);
            }
            _ => {}
        }
    }

    Ok((styles, default_font, default_size))
}

fn parse_core_properties(bytes: &[u8]) -> Result<DocumentProperties> {
    let text = parse_xml(bytes, "docProps/core.xml")?;
    let tree = parse_tree(&text, "docProps/core.xml")?;

    let mut properties = DocumentProperties::default();

    for node in tree.root_element().children().filter(Node::is_element) {
        let ns = node.tag_name().namespace();
        let value = node.text().map(str::to_string).filter(|s| !s.is_empty());

        match (ns, node.tag_name().name()) {
            (Some(DC_NS), "title") => properties.title = value,
            (Some(DC_NS), "subject") => properties.subject = value,
            (Some(DC_NS), "description") => properties.description = value,
            (Some(DC_NS), "creator") => {
                properties.author = value.clone();
                properties.creator = value;
            }
            (Some(CP_NS), "keywords") => properties.keywords = value,
            (Some(CP_NS), "lastModifiedBy") => properties.last_modified_by = value,
            (Some(DCTERMS_NS), "created") => {
                properties.created = value.as_deref().and_then(parse_datetime);
            }
            (Some(DCTERMS_NS), "modified") => {
                properties.modified = value.as_deref().and_then(parse_datetime);
            }
            _ => {}
        }
    }

    Ok(properties)
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
