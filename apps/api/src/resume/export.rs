//! Lays a resume out as positioned text blocks for an external PDF renderer.
//!
//! Coordinates are in points from the top-left corner of the page. Widths are
//! estimated with a fixed per-character advance (the preview uses a monospace
//! face), and wrapping is greedy word-by-word.

use serde::{Deserialize, Serialize};

use crate::models::Resume;

const SEPARATOR: &str = " • ";

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub name_size_pt: f32,
    pub heading_size_pt: f32,
    pub body_size_pt: f32,
    /// Glyph advance as a fraction of the font size.
    pub char_width_em: f32,
    /// Line pitch as a multiple of the font size.
    pub line_spacing: f32,
    /// Vertical gap before each section heading.
    pub section_gap_pt: f32,
}

impl Default for PageLayout {
    /// US letter, 1" margins, 10pt body.
    fn default() -> Self {
        PageLayout {
            page_width_pt: 612.0,
            page_height_pt: 792.0,
            margin_pt: 72.0,
            name_size_pt: 20.0,
            heading_size_pt: 13.0,
            body_size_pt: 10.0,
            char_width_em: 0.6,
            line_spacing: 1.4,
            section_gap_pt: 12.0,
        }
    }
}

impl PageLayout {
    fn text_width(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }

    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * self.char_width_em * font_size
    }

    /// How many characters fit on one line at `font_size`. Never below 1.
    fn chars_per_line(&self, font_size: f32) -> usize {
        let advance = self.char_width_em * font_size;
        if advance <= 0.0 {
            return usize::MAX;
        }
        ((self.text_width() / advance).floor() as usize).max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// Zero-based page index.
    pub page: u32,
    pub x: f32,
    /// Top of the line box.
    pub y: f32,
    pub font_size: f32,
    pub bold: bool,
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Word wrap
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word wrap on whitespace. A word longer than `max_chars` sits alone on
/// its own line rather than being split. Empty input yields no lines.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Page writer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
enum Align {
    Left,
    Center,
    Right,
}

struct PageWriter<'a> {
    layout: &'a PageLayout,
    page: u32,
    y: f32,
    blocks: Vec<TextBlock>,
}

impl<'a> PageWriter<'a> {
    fn new(layout: &'a PageLayout) -> Self {
        PageWriter {
            layout,
            page: 0,
            y: layout.margin_pt,
            blocks: Vec::new(),
        }
    }

    fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.layout.line_spacing
    }

    /// Starts a new page when a line of `height` would cross the bottom margin.
    fn reserve(&mut self, height: f32) {
        let bottom = self.layout.page_height_pt - self.layout.margin_pt;
        if self.y + height > bottom && self.y > self.layout.margin_pt {
            self.page += 1;
            self.y = self.layout.margin_pt;
        }
    }

    fn x_for(&self, text: &str, font_size: f32, align: Align) -> f32 {
        let width = self.layout.measure(text, font_size);
        let left = self.layout.margin_pt;
        match align {
            Align::Left => left,
            Align::Center => left + ((self.layout.text_width() - width) / 2.0).max(0.0),
            Align::Right => left + (self.layout.text_width() - width).max(0.0),
        }
    }

    fn place(&mut self, text: String, font_size: f32, bold: bool, align: Align) {
        let x = self.x_for(&text, font_size, align);
        self.blocks.push(TextBlock {
            page: self.page,
            x,
            y: self.y,
            font_size,
            bold,
            text,
        });
    }

    /// Wraps `text` and writes it line by line.
    fn paragraph(&mut self, text: &str, font_size: f32, bold: bool, align: Align) {
        let height = self.line_height(font_size);
        for line in wrap_text(text, self.layout.chars_per_line(font_size)) {
            self.reserve(height);
            self.place(line, font_size, bold, align);
            self.y += height;
        }
    }

    /// Multi-line text where each source line starts a new paragraph.
    fn preformatted(&mut self, text: &str, font_size: f32) {
        for line in text.lines() {
            self.paragraph(line, font_size, false, Align::Left);
        }
    }

    /// A bold left label with a right-aligned note on the same line.
    fn split_line(&mut self, label: &str, note: &str, font_size: f32) {
        let height = self.line_height(font_size);
        self.reserve(height);
        let max_label = self
            .layout
            .chars_per_line(font_size)
            .saturating_sub(note.chars().count() + 2);
        let mut label_lines = wrap_text(label, max_label.max(1)).into_iter();
        if let Some(first) = label_lines.next() {
            self.place(first, font_size, true, Align::Left);
        }
        if !note.is_empty() {
            self.place(note.to_string(), font_size, false, Align::Right);
        }
        self.y += height;
        for rest in label_lines {
            self.reserve(height);
            self.place(rest, font_size, true, Align::Left);
            self.y += height;
        }
    }

    fn heading(&mut self, title: &str) {
        self.y += self.layout.section_gap_pt;
        let size = self.layout.heading_size_pt;
        // Keep the heading with at least one body line.
        self.reserve(self.line_height(size) + self.line_height(self.layout.body_size_pt));
        self.paragraph(title, size, true, Align::Left);
    }
}

fn joined<'s>(parts: impl IntoIterator<Item = &'s str>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

// ────────────────────────────────────────────────────────────────────────────
// Resume layout
// ────────────────────────────────────────────────────────────────────────────

/// Ordered text blocks covering every non-empty section of `resume`.
pub fn export_blocks(resume: &Resume, layout: &PageLayout) -> Vec<TextBlock> {
    let sections = &resume.sections;
    let header = &sections.header;
    let body = layout.body_size_pt;
    let mut writer = PageWriter::new(layout);

    writer.paragraph(&header.name, layout.name_size_pt, true, Align::Center);
    let contact = joined([
        header.email.as_str(),
        header.phone.as_str(),
        header.location.as_str(),
    ]);
    writer.paragraph(&contact, body, false, Align::Center);
    let links = joined([
        header.linkedin.as_deref().unwrap_or_default(),
        header.portfolio.as_deref().unwrap_or_default(),
    ]);
    writer.paragraph(&links, body, false, Align::Center);

    if !sections.summary.trim().is_empty() {
        writer.heading("PROFESSIONAL SUMMARY");
        writer.paragraph(&sections.summary, body, false, Align::Left);
    }

    if !sections.experience.is_empty() {
        writer.heading("WORK EXPERIENCE");
        for exp in &sections.experience {
            let end = if exp.current {
                "Present"
            } else {
                exp.end_date.as_deref().unwrap_or_default()
            };
            writer.split_line(&exp.title, &format!("{} - {}", exp.start_date, end), body);
            writer.paragraph(
                &joined([exp.company.as_str(), exp.location.as_str()]),
                body,
                false,
                Align::Left,
            );
            writer.preformatted(&exp.description, body);
        }
    }

    if !sections.education.is_empty() {
        writer.heading("EDUCATION");
        for edu in &sections.education {
            writer.split_line(&edu.degree, &edu.graduation_date, body);
            let gpa = edu.gpa.as_ref().map(|g| format!("GPA: {g}"));
            writer.paragraph(
                &joined([
                    edu.school.as_str(),
                    edu.location.as_str(),
                    gpa.as_deref().unwrap_or_default(),
                ]),
                body,
                false,
                Align::Left,
            );
        }
    }

    if !sections.projects.is_empty() {
        writer.heading("PROJECTS");
        for project in &sections.projects {
            writer.split_line(&project.name, project.url.as_deref().unwrap_or_default(), body);
            writer.paragraph(&project.description, body, false, Align::Left);
            if !project.technologies.is_empty() {
                let tech = format!("Technologies: {}", project.technologies.join(", "));
                writer.paragraph(&tech, body, false, Align::Left);
            }
        }
    }

    if !sections.certifications.is_empty() {
        writer.heading("CERTIFICATIONS");
        for cert in &sections.certifications {
            writer.split_line(&cert.name, &cert.date, body);
            writer.paragraph(&cert.issuer, body, false, Align::Left);
        }
    }

    if !sections.skills.is_empty() {
        writer.heading("SKILLS");
        writer.paragraph(&sections.skills.join(SEPARATOR), body, false, Align::Left);
    }

    writer.blocks
}

/// Number of pages the blocks span.
pub fn page_count(blocks: &[TextBlock]) -> u32 {
    blocks.iter().map(|b| b.page + 1).max().unwrap_or(0)
}
