//! Section Parser: splits free-form competitor analysis text into the five canonical sections.
//!
//! This is a tagged-line scanner, not a grammar. A line is a heading when it contains one
//! of the canonical heading strings verbatim (case-sensitive). When a line contains more
//! than one, the earliest section in canonical order wins. Text before the first heading
//! is discarded. Input with no headings yields five empty sections.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// The canonical analysis sections, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisSection {
    ContentStrategy,
    KeywordAnalysis,
    MarketPresence,
    CompetitiveAdvantages,
    ActionableRecommendations,
}

impl AnalysisSection {
    pub const ALL: [AnalysisSection; 5] = [
        AnalysisSection::ContentStrategy,
        AnalysisSection::KeywordAnalysis,
        AnalysisSection::MarketPresence,
        AnalysisSection::CompetitiveAdvantages,
        AnalysisSection::ActionableRecommendations,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            AnalysisSection::ContentStrategy => "Content Strategy",
            AnalysisSection::KeywordAnalysis => "Keyword Analysis",
            AnalysisSection::MarketPresence => "Market Presence",
            AnalysisSection::CompetitiveAdvantages => "Competitive Advantages",
            AnalysisSection::ActionableRecommendations => "Actionable Recommendations",
        }
    }

    /// The section whose heading appears in `line`, first in canonical order.
    pub fn detect(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| line.contains(section.heading()))
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Always exactly the five canonical sections, in canonical order.
/// An empty body means the section was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedAnalysis {
    bodies: [String; 5],
}

impl SectionedAnalysis {
    pub fn get(&self, section: AnalysisSection) -> &str {
        &self.bodies[section.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnalysisSection, &str)> {
        AnalysisSection::ALL
            .into_iter()
            .map(move |section| (section, self.get(section)))
    }

    /// True when no section has a body.
    pub fn is_empty(&self) -> bool {
        self.bodies.iter().all(String::is_empty)
    }

    fn set(&mut self, section: AnalysisSection, body: String) {
        self.bodies[section.index()] = body;
    }
}

impl Serialize for SectionedAnalysis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(AnalysisSection::ALL.len()))?;
        for (section, body) in self.iter() {
            map.serialize_entry(section.heading(), body)?;
        }
        map.end()
    }
}

/// Scans `text` line by line and assigns body lines to the most recent heading.
///
/// Blank lines are dropped; body lines keep their original indentation.
/// A section is only overwritten when the accumulated body is non-empty, so a
/// repeated heading with nothing under it leaves the earlier body intact.
pub fn parse_sections(text: &str) -> SectionedAnalysis {
    let mut sections = SectionedAnalysis::default();
    let mut current: Option<AnalysisSection> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(section) = AnalysisSection::detect(line) {
            if let Some(active) = current {
                flush(&mut sections, active, &mut buffer);
            }
            buffer.clear();
            current = Some(section);
        } else if current.is_some() && !line.trim().is_empty() {
            buffer.push(line);
        }
    }

    if let Some(active) = current {
        flush(&mut sections, active, &mut buffer);
    }

    sections
}

fn flush(sections: &mut SectionedAnalysis, section: AnalysisSection, buffer: &mut Vec<&str>) {
    if !buffer.is_empty() {
        sections.set(section, buffer.join("\n"));
        buffer.clear();
    }
}
