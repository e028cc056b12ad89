//! Rendering the digest as a plain-text and HTML mailing.

pub mod mailer;

pub use mailer::{compose_mailing, send_mailing, MailSettings};

use crate::core::Digest;
use crate::domain::{DocumentRecord, Role};

/// "Today's update: 2 preprints from 3 colleagues"
pub fn subject(digest: &Digest) -> String {
    format!(
        "Today's update: {} {} from {} {}",
        digest.accepted.len(),
        pluralize(digest.accepted.len(), "preprint"),
        digest.colleagues.len(),
        pluralize(digest.colleagues.len(), "colleague"),
    )
}

fn pluralize(n: usize, noun: &str) -> String {
    if n == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Faculty => "Faculty",
        Role::Postdoc => "Postdoc",
        Role::Student => "Graduate student",
    }
}

fn abstract_url(reader_base_url: &str, document: &DocumentRecord) -> String {
    format!(
        "{}/{}/",
        reader_base_url.trim_end_matches('/'),
        document.document_id
    )
}

/// Plain-text body of the mailing.
pub fn render_text(digest: &Digest, reader_base_url: &str, run_time: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", subject(digest)));
    out.push_str(&format!("Generated {run_time}\n\n"));

    for document in &digest.accepted {
        out.push_str(&format!("{}\n", document.title));
        let authors: Vec<&str> = document
            .authors
            .iter()
            .map(|a| a.raw_name.as_str())
            .collect();
        out.push_str(&format!("  {}\n", authors.join(", ")));
        out.push_str(&format!(
            "  arXiv:{} [{}]\n",
            document.document_id, document.area
        ));
        out.push_str(&format!("  {}\n", abstract_url(reader_base_url, document)));
        if !document.abstract_text.is_empty() {
            out.push_str(&format!("  {}\n", document.abstract_text));
        }
        out.push('\n');
    }

    if !digest.colleagues.is_empty() {
        out.push_str("Colleagues in this update:\n");
        for colleague in &digest.colleagues {
            if colleague.position.is_empty() {
                out.push_str(&format!("- {}\n", role_label(colleague.role)));
            } else {
                out.push_str(&format!(
                    "- {} ({})\n",
                    colleague.position,
                    role_label(colleague.role)
                ));
            }
        }
    }

    out
}

/// HTML body of the mailing.
pub fn render_html(digest: &Digest, reader_base_url: &str, run_time: &str) -> String {
    let mut out = String::new();
    out.push_str("<html><body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape(&subject(digest))));
    out.push_str(&format!("<p><em>Generated {}</em></p>\n", escape(run_time)));

    for document in &digest.accepted {
        let url = abstract_url(reader_base_url, document);
        out.push_str(&format!(
            "<h2><a href=\"{}\">{}</a></h2>\n",
            escape(&url),
            escape(&document.title)
        ));

        let authors: Vec<String> = document
            .authors
            .iter()
            .map(|a| {
                // Matched authors are the reason this document is here.
                if a.result.key.is_some() {
                    format!("<strong>{}</strong>", escape(&a.raw_name))
                } else {
                    escape(&a.raw_name)
                }
            })
            .collect();
        out.push_str(&format!("<p>{}</p>\n", authors.join(", ")));
        out.push_str(&format!(
            "<p>arXiv:{} [{}]</p>\n",
            escape(&document.document_id),
            escape(&document.area)
        ));
        if !document.abstract_text.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", escape(&document.abstract_text)));
        }
    }

    if !digest.colleagues.is_empty() {
        out.push_str("<h2>Colleagues in this update</h2>\n<ul>\n");
        for colleague in &digest.colleagues {
            let label = if colleague.position.is_empty() {
                role_label(colleague.role).to_string()
            } else {
                format!("{} ({})", colleague.position, role_label(colleague.role))
            };
            if colleague.image_url.is_empty() {
                out.push_str(&format!("<li>{}</li>\n", escape(&label)));
            } else {
                out.push_str(&format!(
                    "<li><img src=\"{}\" alt=\"\" height=\"48\"> {}</li>\n",
                    escape(&colleague.image_url),
                    escape(&label)
                ));
            }
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</body></html>\n");
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
