//! Reader and writer for the nested-list markup the widget attaches to.
//!
//! The reader accepts the subset authors use for expandable lists: elements with quoted or
//! bare attributes, text, comments, self-closing tags and the usual void elements. Closing
//! tags are required (`</li>` is not implied).

use crate::dom::{DOCUMENT_TAG, ListDocument, NodeData, NodeId};
use crate::error::MarkupError;

const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "meta", "link"];

fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Parses markup into a new document; top-level nodes hang off [`ListDocument::root`].
pub fn parse(input: &str) -> Result<ListDocument, MarkupError> {
    let mut doc = ListDocument::new();
    let root = doc.root();
    parse_into(&mut doc, root, input)?;
    Ok(doc)
}

/// Parses markup and appends the resulting nodes to `parent`.
pub fn parse_into(doc: &mut ListDocument, parent: NodeId, input: &str) -> Result<(), MarkupError> {
    let mut reader = Reader {
        input,
        bytes: input.as_bytes(),
        pos: 0,
    };
    let mut stack: Vec<(NodeId, String)> = Vec::new();

    while reader.pos < reader.bytes.len() {
        let current = stack.last().map_or(parent, |(id, _)| *id);
        let start = reader.pos;

        if reader.starts_with("<!--") {
            let Some(end) = input[start + 4..].find("-->") else {
                return Err(MarkupError::UnterminatedComment { offset: start });
            };
            reader.pos = start + 4 + end + 3;
        } else if reader.starts_with("</") {
            reader.pos += 2;
            let tag = reader.read_name();
            reader.skip_whitespace();
            if !reader.eat(b'>') {
                return Err(MarkupError::UnexpectedEof { offset: start });
            }
            let Some((_, open)) = stack.pop() else {
                return Err(MarkupError::StrayClosingTag { tag, offset: start });
            };
            if open != tag {
                return Err(MarkupError::MismatchedTag {
                    expected: open,
                    found: tag,
                    offset: start,
                });
            }
        } else if reader.peek() == Some(b'<') {
            reader.pos += 1;
            let tag = reader.read_name();
            if tag.is_empty() {
                return Err(MarkupError::EmptyTagName { offset: start });
            }
            let element = doc.create_element(&tag);
            let self_closing = reader.read_attributes(doc, element, start)?;
            doc.append_child(current, element);
            if !self_closing && !is_void(&tag) {
                stack.push((element, tag));
            }
        } else {
            let end = input[start..].find('<').map_or(input.len(), |idx| start + idx);
            let raw = &input[start..end];
            if !raw.trim().is_empty() {
                let text = doc.create_text(decode_entities(raw));
                doc.append_child(current, text);
            }
            reader.pos = end;
        }
    }

    if let Some((_, tag)) = stack.pop() {
        return Err(MarkupError::UnclosedTag { tag });
    }
    Ok(())
}

struct Reader<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.bytes[self.pos..].starts_with(prefix.as_bytes())
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn read_name(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.'))
        {
            self.pos += 1;
        }
        self.input[start..self.pos].to_ascii_lowercase()
    }

    // Returns `true` for `/>`.
    fn read_attributes(
        &mut self,
        doc: &mut ListDocument,
        element: NodeId,
        tag_start: usize,
    ) -> Result<bool, MarkupError> {
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(MarkupError::UnexpectedEof { offset: tag_start }),
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(false);
                }
                Some(b'/') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    if !self.eat(b'>') {
                        return Err(MarkupError::UnexpectedEof { offset: tag_start });
                    }
                    return Ok(true);
                }
                Some(_) => {}
            }

            let name = self.read_name();
            if name.is_empty() {
                // Skip a character we cannot interpret rather than looping forever.
                self.pos += self.input[self.pos..].chars().next().map_or(1, char::len_utf8);
                continue;
            }
            self.skip_whitespace();
            let value = if self.eat(b'=') {
                self.skip_whitespace();
                self.read_value()?
            } else {
                String::new()
            };
            doc.set_attr(element, &name, value);
        }
    }

    fn read_value(&mut self) -> Result<String, MarkupError> {
        let start = self.pos;
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let Some(len) = self.bytes[self.pos..].iter().position(|b| *b == quote) else {
                    return Err(MarkupError::UnterminatedAttribute { offset: start });
                };
                let value = decode_entities(&self.input[self.pos..self.pos + len]);
                self.pos += len + 1;
                Ok(value)
            }
            _ => {
                while self
                    .peek()
                    .is_some_and(|b| !b.is_ascii_whitespace() && b != b'>')
                {
                    self.pos += 1;
                }
                Ok(decode_entities(&self.input[start..self.pos]))
            }
        }
    }
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn escape(raw: &str, out: &mut String) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// Writes a node (and its subtree) back as markup.
///
/// Classes come first, other attributes follow sorted by name, and hidden elements carry
/// `style="display: none"`. The document root writes only its children.
pub fn render(doc: &ListDocument, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, &mut out);
    out
}

fn write_node(doc: &ListDocument, id: NodeId, out: &mut String) {
    let tag = match doc.data(id) {
        Some(NodeData::Text(text)) => {
            escape(text, out);
            return;
        }
        Some(NodeData::Element(_)) => doc.tag(id).unwrap_or_default(),
        None => return,
    };

    if tag == DOCUMENT_TAG {
        for child in doc.children(id) {
            write_node(doc, *child, out);
        }
        return;
    }

    out.push('<');
    out.push_str(tag);
    if !doc.classes(id).is_empty() {
        out.push_str(" class=\"");
        escape(&doc.classes(id).join(" "), out);
        out.push('"');
    }
    let hidden = doc.is_hidden(id);
    for (name, value) in doc.attrs(id) {
        if hidden && name == "style" {
            continue;
        }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape(value, out);
        out.push('"');
    }
    if hidden {
        out.push_str(" style=\"display: none\"");
    }
    out.push('>');

    if is_void(tag) {
        return;
    }
    for child in doc.children(id) {
        write_node(doc, *child, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
