use super::arguments::{ArgumentExtractor, CallShape};

/// One located occurrence of the deprecated call.
///
/// `start..end` covers the whole statement including its indentation and the
/// trailing `);`, so replacing that range with a rendered block that starts
/// with the same indentation keeps the line intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub start: usize,
    pub end: usize,
    pub indent: String,
    pub arguments: Vec<String>,
    pub shape: CallShape,
}

impl CallSite {
    pub fn is_multi_line(&self) -> bool {
        self.shape == CallShape::MultiLine
    }

    /// 1-based line number of the site within `text`.
    pub fn line_in(&self, text: &str) -> usize {
        text[..self.start].matches('\n').count() + 1
    }
}

/// Scan `text` for every non-overlapping call site of the given shape.
pub fn find_call_sites(extractor: &ArgumentExtractor, text: &str, shape: CallShape) -> Vec<CallSite> {
    extractor
        .pattern(shape)
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let arguments = extractor.extract(caps.get(2)?.as_str())?;
            Some(CallSite {
                start: whole.start(),
                end: whole.end(),
                indent: caps.get(1).map_or("", |m| m.as_str()).to_string(),
                arguments,
                shape,
            })
        })
        .collect()
}

/// Replace each site's range with the text produced by `render`.
///
/// Sites must be sorted and non-overlapping, as returned by
/// [`find_call_sites`]. `render` is called in document order, which keeps
/// allocated identifiers increasing from top to bottom.
pub fn replace_call_sites<F>(text: &str, sites: &[CallSite], mut render: F) -> String
where
    F: FnMut(&CallSite) -> String,
{
    let mut output = String::with_capacity(text.len() + sites.len() * 256);
    let mut cursor = 0;

    for site in sites {
        output.push_str(&text[cursor..site.start]);
        output.push_str(&render(site));
        cursor = site.end;
    }
    output.push_str(&text[cursor..]);

    output
}
