//! `srcset` attribute parsing

/// One `url [descriptor]` entry of a `srcset` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrcsetCandidate<'a> {
    pub url: &'a str,
    pub descriptor: Option<&'a str>,
}

/// Split a `srcset` value into its candidates.
///
/// A URL runs up to the next whitespace, so commas inside it (as in `data:`
/// URLs) do not split. Only a comma after the descriptor, or one ending the
/// URL itself, starts the next candidate.
#[must_use]
pub fn parse_srcset(value: &str) -> Vec<SrcsetCandidate<'_>> {
    let mut candidates = Vec::new();
    let mut rest = value;

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if rest.is_empty() {
            break;
        }

        let url_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (url, after_url) = rest.split_at(url_end);

        if url.ends_with(',') {
            candidates.push(SrcsetCandidate {
                url: url.trim_end_matches(','),
                descriptor: None,
            });
            rest = after_url;
            continue;
        }

        let descriptor_end = after_url.find(',').unwrap_or(after_url.len());
        let (descriptor, after_descriptor) = after_url.split_at(descriptor_end);
        let descriptor = descriptor.trim();

        candidates.push(SrcsetCandidate {
            url,
            descriptor: (!descriptor.is_empty()).then_some(descriptor),
        });
        rest = after_descriptor;
    }

    candidates
}

/// Join rewritten candidates back into a `srcset` value
#[must_use]
pub fn format_srcset<'a>(candidates: impl IntoIterator<Item = (String, Option<&'a str>)>) -> String {
    candidates
        .into_iter()
        .map(|(url, descriptor)| match descriptor {
            Some(descriptor) => format!("{url} {descriptor}"),
            None => url,
        })
        .collect::<Vec<_>>()
        .join(", ")
}
