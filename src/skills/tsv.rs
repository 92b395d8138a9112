use super::OcrData;

/// Builds an [`OcrData`] from Tesseract TSV output.
///
/// Every data row contributes one entry, in order, so structural rows
/// (page, block, paragraph, line) show up as empty strings between words.
/// Rows with fewer than 11 columns are skipped.
pub fn parse_tsv_text(tsv: &str) -> OcrData {
    let mut text = Vec::new();

    // Skip header
    for line in tsv.lines().skip(1) {
        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 11 {
            continue;
        }

        let word = fields.get(11).copied().unwrap_or("");
        text.push(word.to_string());
    }

    OcrData { text }
}
