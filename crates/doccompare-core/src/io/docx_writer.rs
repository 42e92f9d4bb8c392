//! Model to DOCX.
//!
//! Emits a minimal complete package: content types, package and
//! document relationships, the main document, styles, numbering,
//! header/footer parts, and core properties. Dangling numbering
//! references are repaired with best-effort defaults before the
//! numbering part is written, so the output never references a
//! definition it does not carry.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use chrono::SecondsFormat;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{CompareError, Result};
use crate::model::{
    Alignment, Block, BreakType, Document, HeaderFooter, LineRule, NumberingDefinition,
    NumberingInstance, NumberingLevel, Orientation, Paragraph, ParagraphStyle, Run,
    RunFormatting, Section, Table, WidthType,
};

use super::package::OoxmlPackage;
use super::DocumentGenerator;

const W_XMLNS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_XMLNS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

#[derive(Debug)]
pub struct DocxGenerator;

impl DocumentGenerator for DocxGenerator {
    fn output_format(&self) -> &str {
        "docx"
    }

    fn generate_path(&self, document: &Document, path: &Path) -> Result<()> {
        let bytes = Self::to_bytes(document)?;
        let mut file = File::create(path)
            .map_err(|e| CompareError::WriteFailure(format!("{}: {}", path.display(), e)))?;
        file.write_all(&bytes)
            .map_err(|e| CompareError::WriteFailure(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    fn generate_stream(&self, document: &Document, writer: &mut dyn Write) -> Result<()> {
        let bytes = Self::to_bytes(document)?;
        writer
            .write_all(&bytes)
            .map_err(|e| CompareError::WriteFailure(e.to_string()))?;
        Ok(())
    }
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn xml_err<E: std::fmt::Display>(e: E) -> CompareError {
    CompareError::XmlWrite(e.to_string())
}

fn new_part() -> Result<XmlWriter> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)?;
    Ok(writer)
}

fn finish_part(writer: XmlWriter) -> Vec<u8> {
    writer.into_inner().into_inner()
}

fn start_el(writer: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut el = BytesStart::new(name);
    for (key, value) in attrs {
        el.push_attribute((*key, *value));
    }
    writer.write_event(Event::Start(el)).map_err(xml_err)
}

fn empty_el(writer: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut el = BytesStart::new(name);
    for (key, value) in attrs {
        el.push_attribute((*key, *value));
    }
    writer.write_event(Event::Empty(el)).map_err(xml_err)
}

fn end_el(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)
}

fn text_el(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    start_el(writer, name, &[])?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    end_el(writer, name)
}

/// One header or footer scheduled for emission, with its part name and
/// relationship id pre-assigned.
struct HeaderFooterPart<'a> {
    rel_id: String,
    part_name: String,
    reference_kind: &'static str,
    is_header: bool,
    content: &'a HeaderFooter,
}

/// Relationship references belonging to one section's sectPr.
type SectionRefs<'a> = Vec<HeaderFooterPart<'a>>;

impl DocxGenerator {
    /// Serialize the full package to memory.
    pub fn to_bytes(document: &Document) -> Result<Vec<u8>> {
        let mut package = OoxmlPackage::new();

        let (definitions, instances) = repaired_numbering(document);
        let has_numbering = !definitions.is_empty() || !instances.is_empty();

        let section_refs = plan_header_footer_parts(document, has_numbering);

        package.set_part(
            "[Content_Types].xml",
            write_content_types(has_numbering, &section_refs)?,
        );
        package.set_part("_rels/.rels", write_package_relationships()?);
        package.set_part(
            "word/_rels/document.xml.rels",
            write_document_relationships(has_numbering, &section_refs)?,
        );
        package.set_part(
            "word/document.xml",
            write_main_document(document, &section_refs)?,
        );
        package.set_part("word/styles.xml", write_styles(document)?);
        if has_numbering {
            package.set_part(
                "word/numbering.xml",
                write_numbering(&definitions, &instances)?,
            );
        }
        for refs in &section_refs {
            for part in refs {
                let name = format!("word/{}", part.part_name);
                package.set_part(&name, write_header_footer(part)?);
            }
        }
        package.set_part("docProps/core.xml", write_core_properties(document)?);

        package.save()
    }
}

/// Numbering definitions and instances with dangling references
/// repaired: every instance a paragraph references exists, and every
/// instance's definition exists.
fn repaired_numbering(
    document: &Document,
) -> (Vec<NumberingDefinition>, Vec<NumberingInstance>) {
    let mut definitions = document.numbering_definitions.clone();
    let mut instances = document.numbering_instances.clone();

    for paragraph in document.paragraphs_flat() {
        let Some(info) = paragraph.numbering else { continue };
        if !instances.iter().any(|i| i.id == info.instance_id) {
            let definition_id = definitions.first().map(|d| d.id).unwrap_or(info.instance_id);
            instances.push(NumberingInstance::new(info.instance_id, definition_id));
        }
    }

    for instance in &instances {
        if !definitions.iter().any(|d| d.id == instance.definition_id) {
            definitions.push(NumberingDefinition::default_decimal(instance.definition_id));
        }
    }

    (definitions, instances)
}

/// Assign part names and relationship ids to every header/footer in
/// every section. Document relationships rId1 is styles; rId2 is
/// numbering when present; header/footer ids follow.
fn plan_header_footer_parts(document: &Document, has_numbering: bool) -> Vec<SectionRefs<'_>> {
    let mut next_rel = if has_numbering { 3 } else { 2 };
    let mut header_index = 0usize;
    let mut footer_index = 0usize;
    let mut all = Vec::new();

    for section in &document.sections {
        let mut refs = Vec::new();

        let header_slots: [(&Option<HeaderFooter>, &'static str); 3] = [
            (&section.headers.default, "default"),
            (&section.headers.first, "first"),
            (&section.headers.even, "even"),
        ];
        for (slot, kind) in header_slots {
            if let Some(content) = slot {
                header_index += 1;
                refs.push(HeaderFooterPart {
                    rel_id: format!("rId{next_rel}"),
                    part_name: format!("header{header_index}.xml"),
                    reference_kind: kind,
                    is_header: true,
                    content,
                });
                next_rel += 1;
            }
        }

        let footer_slots: [(&Option<HeaderFooter>, &'static str); 3] = [
            (&section.footers.default, "default"),
            (&section.footers.first, "first"),
            (&section.footers.even, "even"),
        ];
        for (slot, kind) in footer_slots {
            if let Some(content) = slot {
                footer_index += 1;
                refs.push(HeaderFooterPart {
                    rel_id: format!("rId{next_rel}"),
                    part_name: format!("footer{footer_index}.xml"),
                    reference_kind: kind,
                    is_header: false,
                    content,
                });
                next_rel += 1;
            }
        }

        all.push(refs);
    }

    all
}

fn write_content_types(
    has_numbering: bool,
    section_refs: &[SectionRefs<'_>],
) -> Result<Vec<u8>> {
    let mut w = new_part()?;
    start_el(
        &mut w,
        "Types",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/content-types",
        )],
    )?;

    empty_el(
        &mut w,
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    empty_el(
        &mut w,
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;

    let overrides: &[(&str, &str)] = &[
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
    ];
    for &(part, content_type) in overrides {
        empty_el(
            &mut w,
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }

    if has_numbering {
        empty_el(
            &mut w,
            "Override",
            &[
                ("PartName", "/word/numbering.xml"),
                (
                    "ContentType",
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
                ),
            ],
        )?;
    }

    for refs in section_refs {
        for part in refs {
            let part_name = format!("/word/{}", part.part_name);
            let content_type = if part.is_header {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"
            } else {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"
            };
            empty_el(
                &mut w,
                "Override",
                &[
                    ("PartName", part_name.as_str()),
                    ("ContentType", content_type),
                ],
            )?;
        }
    }

    end_el(&mut w, "Types")?;
    Ok(finish_part(w))
}

fn write_package_relationships() -> Result<Vec<u8>> {
    let mut w = new_part()?;
    start_el(
        &mut w,
        "Relationships",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/relationships",
        )],
    )?;
    empty_el(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
            ),
            ("Target", "word/document.xml"),
        ],
    )?;
    empty_el(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId2"),
            (
                "Type",
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            ),
            ("Target", "docProps/core.xml"),
        ],
    )?;
    end_el(&mut w, "Relationships")?;
    Ok(finish_part(w))
}

fn write_document_relationships(
    has_numbering: bool,
    section_refs: &[SectionRefs<'_>],
) -> Result<Vec<u8>> {
    let mut w = new_part()?;
    start_el(
        &mut w,
        "Relationships",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/relationships",
        )],
    )?;
    empty_el(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles",
            ),
            ("Target", "styles.xml"),
        ],
    )?;
    if has_numbering {
        empty_el(
            &mut w,
            "Relationship",
            &[
                ("Id", "rId2"),
                (
                    "Type",
                    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering",
                ),
                ("Target", "numbering.xml"),
            ],
        )?;
    }

    for refs in section_refs {
        for part in refs {
            let rel_type = if part.is_header {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header"
            } else {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer"
            };
            empty_el(
                &mut w,
                "Relationship",
                &[
                    ("Id", part.rel_id.as_str()),
                    ("Type", rel_type),
                    ("Target", part.part_name.as_str()),
                ],
            )?;
        }
    }

    end_el(&mut w, "Relationships")?;
    Ok(finish_part(w))
}

fn write_main_document(
    document: &Document,
    section_refs: &[SectionRefs<'_>],
) -> Result<Vec<u8>> {
    let mut w = new_part()?;
    start_el(
        &mut w,
        "w:document",
        &[("xmlns:w", W_XMLNS), ("xmlns:r", R_XMLNS)],
    )?;
    start_el(&mut w, "w:body", &[])?;

    let last_index = document.sections.len().saturating_sub(1);
    for (index, section) in document.sections.iter().enumerate() {
        let refs = section_refs.get(index).map(|r| r.as_slice()).unwrap_or(&[]);
        let is_last = index == last_index;

        if is_last {
            for block in &section.blocks {
                write_block(&mut w, block, None)?;
            }
            write_section_properties(&mut w, section, refs)?;
        } else {
            // A mid-document section break lives in the pPr of the
            // section's final paragraph.
            let ends_with_paragraph =
                matches!(section.blocks.last(), Some(Block::Paragraph(_)));
            let block_count = section.blocks.len();

            for (block_index, block) in section.blocks.iter().enumerate() {
                let closes_section = ends_with_paragraph && block_index + 1 == block_count;
                if closes_section {
                    write_block(&mut w, block, Some((section, refs)))?;
                } else {
                    write_block(&mut w, block, None)?;
                }
            }

            if !ends_with_paragraph {
                // No trailing paragraph to carry the break; emit an
                // empty one.
                start_el(&mut w, "w:p", &[])?;
                start_el(&mut w, "w:pPr", &[])?;
                write_section_properties(&mut w, section, refs)?;
                end_el(&mut w, "w:pPr")?;
                end_el(&mut w, "w:p")?;
            }
        }
    }

    if document.sections.is_empty() {
        let section = Section::new();
        write_section_properties(&mut w, &section, &[])?;
    }

    end_el(&mut w, "w:body")?;
    end_el(&mut w, "w:document")?;
    Ok(finish_part(w))
}

fn write_block(
    w: &mut XmlWriter,
    block: &Block,
    section_break: Option<(&Section, &[HeaderFooterPart<'_>])>,
) -> Result<()> {
    match block {
        Block::Paragraph(paragraph) => write_paragraph(w, paragraph, section_break),
        Block::Table(table) => write_table(w, table),
    }
}

fn write_paragraph(
    w: &mut XmlWriter,
    paragraph: &Paragraph,
    section_break: Option<(&Section, &[HeaderFooterPart<'_>])>,
) -> Result<()> {
    start_el(w, "w:p", &[])?;

    let has_ppr = paragraph_has_properties(&paragraph.style)
        || paragraph.numbering.is_some()
        || section_break.is_some();
    if has_ppr {
        start_el(w, "w:pPr", &[])?;
        write_paragraph_style(w, &paragraph.style)?;
        if let Some(numbering) = paragraph.numbering {
            start_el(w, "w:numPr", &[])?;
            let level = numbering.level.to_string();
            let id = numbering.instance_id.to_string();
            empty_el(w, "w:ilvl", &[("w:val", level.as_str())])?;
            empty_el(w, "w:numId", &[("w:val", id.as_str())])?;
            end_el(w, "w:numPr")?;
        }
        if let Some((section, refs)) = section_break {
            write_section_properties(w, section, refs)?;
        }
        end_el(w, "w:pPr")?;
    }

    for (index, name) in paragraph.bookmark_starts.iter().enumerate() {
        let id = index.to_string();
        empty_el(
            w,
            "w:bookmarkStart",
            &[("w:id", id.as_str()), ("w:name", name.as_str())],
        )?;
    }

    for run in &paragraph.runs {
        write_run(w, run)?;
    }

    for id in &paragraph.bookmark_ends {
        empty_el(w, "w:bookmarkEnd", &[("w:id", id.as_str())])?;
    }

    end_el(w, "w:p")
}

fn paragraph_has_properties(style: &ParagraphStyle) -> bool {
    style != &ParagraphStyle::default()
}

fn write_paragraph_style(w: &mut XmlWriter, style: &ParagraphStyle) -> Result<()> {
    if let Some(id) = &style.style_id {
        empty_el(w, "w:pStyle", &[("w:val", id.as_str())])?;
    } else if let Some(level) = style.heading_level {
        let id = format!("Heading{level}");
        empty_el(w, "w:pStyle", &[("w:val", id.as_str())])?;
    }
    if style.keep_with_next {
        empty_el(w, "w:keepNext", &[])?;
    }
    if style.keep_lines_together {
        empty_el(w, "w:keepLines", &[])?;
    }
    if style.page_break_before {
        empty_el(w, "w:pageBreakBefore", &[])?;
    }

    if style.spacing_before != 0 || style.spacing_after != 0 || style.line_spacing != 0 {
        let before = style.spacing_before.to_string();
        let after = style.spacing_after.to_string();
        let line = style.line_spacing.to_string();
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if style.spacing_before != 0 {
            attrs.push(("w:before", before.as_str()));
        }
        if style.spacing_after != 0 {
            attrs.push(("w:after", after.as_str()));
        }
        if style.line_spacing != 0 {
            attrs.push(("w:line", line.as_str()));
            attrs.push((
                "w:lineRule",
                match style.line_rule {
                    LineRule::Auto => "auto",
                    LineRule::Exact => "exact",
                    LineRule::AtLeast => "atLeast",
                },
            ));
        }
        empty_el(w, "w:spacing", &attrs)?;
    }

    if style.indent_left != 0 || style.indent_right != 0 || style.indent_first_line != 0 {
        let left = style.indent_left.to_string();
        let right = style.indent_right.to_string();
        let first = style.indent_first_line.abs().to_string();
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if style.indent_left != 0 {
            attrs.push(("w:left", left.as_str()));
        }
        if style.indent_right != 0 {
            attrs.push(("w:right", right.as_str()));
        }
        if style.indent_first_line > 0 {
            attrs.push(("w:firstLine", first.as_str()));
        } else if style.indent_first_line < 0 {
            attrs.push(("w:hanging", first.as_str()));
        }
        empty_el(w, "w:ind", &attrs)?;
    }

    if style.alignment != Alignment::Left {
        empty_el(w, "w:jc", &[("w:val", alignment_value(style.alignment))])?;
    }

    if let Some(level) = style.outline_level {
        let level = level.to_string();
        empty_el(w, "w:outlineLvl", &[("w:val", level.as_str())])?;
    }

    Ok(())
}

fn alignment_value(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

fn write_run(w: &mut XmlWriter, run: &Run) -> Result<()> {
    start_el(w, "w:r", &[])?;
    write_run_properties(w, &run.formatting)?;

    // Tabs and breaks are elements on the wire; split the text around
    // them.
    let mut buffer = String::new();
    for c in run.text.chars() {
        match c {
            '\t' => {
                flush_text(w, &mut buffer)?;
                empty_el(w, "w:tab", &[])?;
            }
            '\n' => {
                flush_text(w, &mut buffer)?;
                empty_el(w, "w:br", &[])?;
            }
            other => buffer.push(other),
        }
    }
    flush_text(w, &mut buffer)?;

    end_el(w, "w:r")
}

fn flush_text(w: &mut XmlWriter, buffer: &mut String) -> Result<()> {
    if buffer.is_empty() {
        return Ok(());
    }

    let needs_preserve = buffer.starts_with(char::is_whitespace)
        || buffer.ends_with(char::is_whitespace);
    if needs_preserve {
        start_el(w, "w:t", &[("xml:space", "preserve")])?;
    } else {
        start_el(w, "w:t", &[])?;
    }
    w.write_event(Event::Text(BytesText::new(buffer)))
        .map_err(xml_err)?;
    end_el(w, "w:t")?;

    buffer.clear();
    Ok(())
}

fn write_run_properties(w: &mut XmlWriter, formatting: &RunFormatting) -> Result<()> {
    if formatting == &RunFormatting::default() {
        return Ok(());
    }

    start_el(w, "w:rPr", &[])?;
    if let Some(style_id) = &formatting.style_id {
        empty_el(w, "w:rStyle", &[("w:val", style_id.as_str())])?;
    }
    if let Some(font) = &formatting.font_family {
        empty_el(
            w,
            "w:rFonts",
            &[("w:ascii", font.as_str()), ("w:hAnsi", font.as_str())],
        )?;
    }
    if formatting.bold {
        empty_el(w, "w:b", &[])?;
    }
    if formatting.italic {
        empty_el(w, "w:i", &[])?;
    }
    if formatting.strikethrough {
        empty_el(w, "w:strike", &[])?;
    }
    if formatting.underline {
        empty_el(w, "w:u", &[("w:val", "single")])?;
    }
    if formatting.superscript {
        empty_el(w, "w:vertAlign", &[("w:val", "superscript")])?;
    } else if formatting.subscript {
        empty_el(w, "w:vertAlign", &[("w:val", "subscript")])?;
    }
    if let Some(color) = &formatting.color {
        empty_el(w, "w:color", &[("w:val", color.as_str())])?;
    }
    if let Some(size) = formatting.font_size {
        let half_points = ((size * 2.0).round() as i64).to_string();
        empty_el(w, "w:sz", &[("w:val", half_points.as_str())])?;
        empty_el(w, "w:szCs", &[("w:val", half_points.as_str())])?;
    }
    if let Some(highlight) = &formatting.highlight {
        empty_el(w, "w:highlight", &[("w:val", highlight.as_str())])?;
    }
    end_el(w, "w:rPr")
}

fn write_table(w: &mut XmlWriter, table: &Table) -> Result<()> {
    start_el(w, "w:tbl", &[])?;

    start_el(w, "w:tblPr", &[])?;
    if let Some(width) = table.properties.width {
        let width = width.to_string();
        let width_type = match table.properties.width_type {
            WidthType::Auto => "auto",
            WidthType::Dxa => "dxa",
            WidthType::Pct => "pct",
        };
        empty_el(
            w,
            "w:tblW",
            &[("w:w", width.as_str()), ("w:type", width_type)],
        )?;
    }
    if let Some(alignment) = table.properties.alignment {
        empty_el(w, "w:jc", &[("w:val", alignment_value(alignment))])?;
    }
    end_el(w, "w:tblPr")?;

    for row in &table.rows {
        start_el(w, "w:tr", &[])?;
        for cell in &row.cells {
            start_el(w, "w:tc", &[])?;
            if cell.blocks.is_empty() {
                // Cells must carry at least one paragraph.
                empty_el(w, "w:p", &[])?;
            } else {
                for block in &cell.blocks {
                    write_block(w, block, None)?;
                }
            }
            end_el(w, "w:tc")?;
        }
        end_el(w, "w:tr")?;
    }

    end_el(w, "w:tbl")
}

fn write_section_properties(
    w: &mut XmlWriter,
    section: &Section,
    refs: &[HeaderFooterPart<'_>],
) -> Result<()> {
    start_el(w, "w:sectPr", &[])?;

    for part in refs {
        let name = if part.is_header {
            "w:headerReference"
        } else {
            "w:footerReference"
        };
        empty_el(
            w,
            name,
            &[
                ("w:type", part.reference_kind),
                ("r:id", part.rel_id.as_str()),
            ],
        )?;
    }

    let props = &section.properties;
    if props.break_type != BreakType::NextPage {
        let value = match props.break_type {
            BreakType::Continuous => "continuous",
            BreakType::EvenPage => "evenPage",
            BreakType::OddPage => "oddPage",
            BreakType::NextPage => "nextPage",
        };
        empty_el(w, "w:type", &[("w:val", value)])?;
    }

    let width = props.page_width.to_string();
    let height = props.page_height.to_string();
    let mut size_attrs: Vec<(&str, &str)> =
        vec![("w:w", width.as_str()), ("w:h", height.as_str())];
    if props.orientation == Orientation::Landscape {
        size_attrs.push(("w:orient", "landscape"));
    }
    empty_el(w, "w:pgSz", &size_attrs)?;

    let top = props.margin_top.to_string();
    let bottom = props.margin_bottom.to_string();
    let left = props.margin_left.to_string();
    let right = props.margin_right.to_string();
    let header = props.header_distance.to_string();
    let footer = props.footer_distance.to_string();
    empty_el(
        w,
        "w:pgMar",
        &[
            ("w:top", top.as_str()),
            ("w:bottom", bottom.as_str()),
            ("w:left", left.as_str()),
            ("w:right", right.as_str()),
            ("w:header", header.as_str()),
            ("w:footer", footer.as_str()),
        ],
    )?;

    if props.different_first_page {
        empty_el(w, "w:titlePg", &[])?;
    }

    end_el(w, "w:sectPr")
}

fn write_styles(document: &Document) -> Result<Vec<u8>> {
    let mut w = new_part()?;
    start_el(&mut w, "w:styles", &[("xmlns:w", W_XMLNS)])?;

    let has_defaults = document.properties.default_font.is_some()
        || document.properties.default_font_size.is_some();
    if has_defaults {
        start_el(&mut w, "w:docDefaults", &[])?;
        start_el(&mut w, "w:rPrDefault", &[])?;
        start_el(&mut w, "w:rPr", &[])?;
        if let Some(font) = &document.properties.default_font {
            empty_el(
                &mut w,
                "w:rFonts",
                &[("w:ascii", font.as_str()), ("w:hAnsi", font.as_str())],
            )?;
        }
        if let Some(size) = document.properties.default_font_size {
            let half_points = ((size * 2.0).round() as i64).to_string();
            empty_el(&mut w, "w:sz", &[("w:val", half_points.as_str())])?;
        }
        end_el(&mut w, "w:rPr")?;
        end_el(&mut w, "w:rPrDefault")?;
        end_el(&mut w, "w:docDefaults")?;
    }

    for style in &document.styles {
        start_el(
            &mut w,
            "w:style",
            &[
                ("w:type", style.style_type.as_ooxml()),
                ("w:styleId", style.id.as_str()),
            ],
        )?;
        if let Some(name) = &style.name {
            empty_el(&mut w, "w:name", &[("w:val", name.as_str())])?;
        }
        if let Some(based_on) = &style.based_on {
            empty_el(&mut w, "w:basedOn", &[("w:val", based_on.as_str())])?;
        }
        if let Some(next) = &style.next_style {
            empty_el(&mut w, "w:next", &[("w:val", next.as_str())])?;
        }
        if let Some(paragraph) = &style.paragraph {
            start_el(&mut w, "w:pPr", &[])?;
            write_paragraph_style(&mut w, paragraph)?;
            end_el(&mut w, "w:pPr")?;
        }
        if let Some(run) = &style.run {
            write_run_properties(&mut w, run)?;
        }
        end_el(&mut w, "w:style")?;
    }

    end_el(&mut w, "w:styles")?;
    Ok(finish_part(w))
}

fn write_numbering(
    definitions: &[NumberingDefinition],
    instances: &[NumberingInstance],
) -> Result<Vec<u8>> {
    let mut w = new_part()?;
    start_el(&mut w, "w:numbering", &[("xmlns:w", W_XMLNS)])?;

    for definition in definitions {
        let id = definition.id.to_string();
        start_el(
            &mut w,
            "w:abstractNum",
            &[("w:abstractNumId", id.as_str())],
        )?;
        if let Some(name) = &definition.name {
            empty_el(&mut w, "w:name", &[("w:val", name.as_str())])?;
        }
        empty_el(
            &mut w,
            "w:multiLevelType",
            &[(
                "w:val",
                if definition.multi_level {
                    "multilevel"
                } else {
                    "singleLevel"
                },
            )],
        )?;
        for level in &definition.levels {
            write_numbering_level(&mut w, level)?;
        }
        end_el(&mut w, "w:abstractNum")?;
    }

    for instance in instances {
        let id = instance.id.to_string();
        start_el(&mut w, "w:num", &[("w:numId", id.as_str())])?;
        let definition_id = instance.definition_id.to_string();
        empty_el(
            &mut w,
            "w:abstractNumId",
            &[("w:val", definition_id.as_str())],
        )?;
        for level_override in instance.overrides.values() {
            let level = level_override.level.to_string();
            start_el(&mut w, "w:lvlOverride", &[("w:ilvl", level.as_str())])?;
            if let Some(start) = level_override.start_override {
                let start = start.to_string();
                empty_el(&mut w, "w:startOverride", &[("w:val", start.as_str())])?;
            }
            if let Some(redefinition) = &level_override.level_redefinition {
                write_numbering_level(&mut w, redefinition)?;
            }
            end_el(&mut w, "w:lvlOverride")?;
        }
        end_el(&mut w, "w:num")?;
    }

    end_el(&mut w, "w:numbering")?;
    Ok(finish_part(w))
}

fn write_numbering_level(w: &mut XmlWriter, level: &NumberingLevel) -> Result<()> {
    let index = level.index.to_string();
    start_el(w, "w:lvl", &[("w:ilvl", index.as_str())])?;

    let start = level.start.to_string();
    empty_el(w, "w:start", &[("w:val", start.as_str())])?;
    empty_el(w, "w:numFmt", &[("w:val", level.format.as_ooxml())])?;
    empty_el(w, "w:lvlText", &[("w:val", level.text.as_str())])?;
    empty_el(w, "w:lvlJc", &[("w:val", alignment_value(level.alignment))])?;

    if level.indent.is_some() || level.hanging.is_some() {
        let indent = level.indent.unwrap_or(0).to_string();
        let hanging = level.hanging.unwrap_or(0).to_string();
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if level.indent.is_some() {
            attrs.push(("w:left", indent.as_str()));
        }
        if level.hanging.is_some() {
            attrs.push(("w:hanging", hanging.as_str()));
        }
        start_el(w, "w:pPr", &[])?;
        empty_el(w, "w:ind", &attrs)?;
        end_el(w, "w:pPr")?;
    }

    if let Some(font) = &level.font {
        start_el(w, "w:rPr", &[])?;
        empty_el(
            w,
            "w:rFonts",
            &[("w:ascii", font.as_str()), ("w:hAnsi", font.as_str())],
        )?;
        end_el(w, "w:rPr")?;
    }

    end_el(w, "w:lvl")
}

fn write_header_footer(part: &HeaderFooterPart<'_>) -> Result<Vec<u8>> {
    let root = if part.is_header { "w:hdr" } else { "w:ftr" };

    let mut w = new_part()?;
    start_el(&mut w, root, &[("xmlns:w", W_XMLNS), ("xmlns:r", R_XMLNS)])?;
    for paragraph in &part.content.paragraphs {
        write_paragraph(&mut w, paragraph, None)?;
    }
    end_el(&mut w, root)?;
    Ok(finish_part(w))
}

fn write_core_properties(document: &Document) -> Result<Vec<u8>> {
    let properties = &document.properties;

    let mut w = new_part()?;
    start_el(
        &mut w,
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;

    if let Some(title) = &properties.title {
        text_el(&mut w, "dc:title", title)?;
    }
    if let Some(subject) = &properties.subject {
        text_el(&mut w, "dc:subject", subject)?;
    }
    if let Some(description) = &properties.description {
        text_el(&mut w, "dc:description", description)?;
    }
    if let Some(creator) = properties.creator.as_ref().or(properties.author.as_ref()) {
        text_el(&mut w, "dc:creator", creator)?;
    }
    if let Some(keywords) = &properties.keywords {
        text_el(&mut w, "cp:keywords", keywords)?;
    }
    if let Some(last_modified_by) = &properties.last_modified_by {
        text_el(&mut w, "cp:lastModifiedBy", last_modified_by)?;
    }
    if let Some(created) = properties.created {
        start_el(
            &mut w,
            "dcterms:created",
            &[("xsi:type", "dcterms:W3CDTF")],
        )?;
        let value = created.to_rfc3339_opts(SecondsFormat::Secs, true);
        w.write_event(Event::Text(BytesText::new(&value)))
            .map_err(xml_err)?;
        end_el(&mut w, "dcterms:created")?;
    }
    if let Some(modified) = properties.modified {
        start_el(
            &mut w,
            "dcterms:modified",
            &[("xsi:type", "dcterms:W3CDTF")],
        )?;
        let value = modified.to_rfc3339_opts(SecondsFormat::Secs, true);
        w.write_event(Event::Text(BytesText::new(&value)))
            .map_err(xml_err)?;
        end_el(&mut w, "dcterms:modified")?;
    }

    end_el(&mut w, "cp:coreProperties")?;
    Ok(finish_part(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::DocxParser;
    use crate::model::NumberingInfo;

    fn doc_of(texts: &[&str]) -> Document {
        let mut doc = Document::new();
        let mut section = Section::new();
        for text in texts {
            section
                .blocks
                .push(Block::Paragraph(Paragraph::from_text(*text)));
        }
        doc.sections.push(section);
        doc
    }

    #[test]
    fn generated_package_has_required_parts() {
        let doc = doc_of(&["hello"]);
        let bytes = DocxGenerator::to_bytes(&doc).unwrap();
        let package = OoxmlPackage::open(&bytes).unwrap();

        assert!(package.has_part("[Content_Types].xml"));
        assert!(package.has_part("_rels/.rels"));
        assert!(package.has_part("word/document.xml"));
        assert!(package.has_part("word/styles.xml"));
        assert!(package.has_part("docProps/core.xml"));
        assert!(!package.has_part("word/numbering.xml"));
    }

    #[test]
    fn numbering_part_written_when_lists_exist() {
        let mut doc = doc_of(&["item"]);
        doc.numbering_definitions
            .push(NumberingDefinition::default_decimal(1));
        doc.numbering_instances.push(NumberingInstance::new(2, 1));

        let bytes = DocxGenerator::to_bytes(&doc).unwrap();
        let package = OoxmlPackage::open(&bytes).unwrap();
        assert!(package.has_part("word/numbering.xml"));
    }

    #[test]
    fn dangling_numbering_reference_is_repaired() {
        let mut doc = doc_of(&[]);
        let para = Paragraph::from_text("listed").with_numbering(42, 0);
        doc.sections[0].blocks.push(Block::Paragraph(para));

        let bytes = DocxGenerator::to_bytes(&doc).unwrap();
        let parsed = DocxParser::from_bytes(&bytes).unwrap();

        let info: NumberingInfo = parsed.paragraphs_flat()[0].numbering.unwrap();
        assert_eq!(info.instance_id, 42);
        let instance = parsed.numbering_instance(42).expect("instance emitted");
        assert!(parsed.numbering_definition(instance.definition_id).is_some());
    }

    #[test]
    fn surrounding_spaces_survive_serialization() {
        let mut doc = doc_of(&[]);
        let mut para = Paragraph::new();
        para.add_run("lead ", RunFormatting::default());
        para.add_run(" trail", RunFormatting::default());
        doc.sections[0].blocks.push(Block::Paragraph(para));

        let bytes = DocxGenerator::to_bytes(&doc).unwrap();
        let parsed = DocxParser::from_bytes(&bytes).unwrap();

        let runs = &parsed.paragraphs_flat()[0].runs;
        assert_eq!(runs[0].text, "lead ");
        assert_eq!(runs[1].text, " trail");
    }

    #[test]
    fn generation_is_deterministic() {
        let mut doc = doc_of(&["alpha", "beta"]);
        doc.properties.title = Some("Contract".to_string());

        let first = DocxGenerator::to_bytes(&doc).unwrap();
        let second = DocxGenerator::to_bytes(&doc).unwrap();
        assert_eq!(first, second);
    }
}
