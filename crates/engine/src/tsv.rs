//! Tesseract TSV output → line-level [`Fragment`]s.
//!
//! TSV columns: `level page_num block_num par_num line_num word_num left top
//! width height conf text`. Only word rows (level 5) carry text; they are
//! grouped by `(block, paragraph, line)` so each fragment is one printed line.

use crate::types::{BoundingBox, Fragment};

const WORD_LEVEL: u32 = 5;

struct Word<'a> {
    line_key: (u32, u32, u32),
    bbox: BoundingBox,
    conf: f32,
    text: &'a str,
}

fn parse_row(row: &str) -> Option<Word<'_>> {
    let cols: Vec<&str> = row.splitn(12, '\t').collect();
    if cols.len() < 12 {
        return None;
    }
    let num = |i: usize| cols[i].trim().parse::<u32>().ok();
    if num(0)? != WORD_LEVEL {
        return None;
    }
    let conf = cols[10].trim().parse::<f32>().ok()?;
    let text = cols[11].trim();
    // Tesseract reports -1 for rows with no recognized symbols.
    if conf < 0.0 || text.is_empty() {
        return None;
    }
    Some(Word {
        line_key: (num(2)?, num(3)?, num(4)?),
        bbox: BoundingBox::new(num(6)?, num(7)?, num(8)?, num(9)?),
        conf,
        text,
    })
}

struct LineAcc {
    key: (u32, u32, u32),
    bbox: BoundingBox,
    words: Vec<String>,
    conf_sum: f32,
}

impl LineAcc {
    fn start(word: Word<'_>) -> Self {
        Self {
            key: word.line_key,
            bbox: word.bbox,
            words: vec![word.text.to_string()],
            conf_sum: word.conf,
        }
    }

    fn push(&mut self, word: Word<'_>) {
        self.bbox = self.bbox.union(&word.bbox);
        self.words.push(word.text.to_string());
        self.conf_sum += word.conf;
    }

    fn finish(self) -> Fragment {
        let mean = self.conf_sum / self.words.len() as f32;
        Fragment::new(self.bbox, self.words.join(" "), mean / 100.0)
    }
}

/// Parse a full TSV document. Rows keep their reading order; header and
/// malformed rows are skipped.
pub fn parse_tsv(tsv: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut current: Option<LineAcc> = None;

    for word in tsv.lines().filter_map(parse_row) {
        match current.as_mut() {
            Some(line) if line.key == word.line_key => line.push(word),
            _ => {
                if let Some(done) = current.replace(LineAcc::start(word)) {
                    fragments.push(done.finish());
                }
            }
        }
    }
    if let Some(done) = current {
        fragments.push(done.finish());
    }
    fragments
}
