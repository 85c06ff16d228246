use super::*;

/// Builds a [`Document`] from an HTML fragment.
///
/// Only what form markup needs is understood: elements with quoted, unquoted
/// and bare attributes, text with character references, comments,
/// declarations, void elements, raw-text bodies and implied `</option>`.
pub(super) fn parse_html(html: &str) -> Result<Document> {
    let mut dom = Document::new();
    let mut open = vec![dom.root()];
    let mut cursor = Cursor::new(html);

    while !cursor.at_end() {
        if cursor.eat("<!--") {
            if !cursor.skip_past("-->") {
                return Err(Error::HtmlParse("unclosed HTML comment".into()));
            }
        } else if cursor.looking_at("</") {
            let name = cursor.read_end_tag()?;
            // Stray end tags are dropped.
            if let Some(index) = open
                .iter()
                .skip(1)
                .rposition(|node| dom.tag_name(*node) == Some(name.as_str()))
            {
                open.truncate(index + 1);
            }
        } else if cursor.looking_at("<!") {
            cursor.skip_declaration()?;
        } else if cursor.looking_at("<") {
            let tag = cursor.read_start_tag()?;
            close_implied_option(&dom, &mut open, &tag.name);
            let node = dom.create_element(innermost(&open)?, tag.name.clone(), tag.attrs);
            if tag.self_closing {
                continue;
            }
            if let Some(decode) = raw_text_mode(&tag.name) {
                let body = cursor
                    .raw_text(&tag.name)
                    .ok_or_else(|| Error::HtmlParse(format!("unclosed <{}>", tag.name)))?;
                let text = if decode {
                    decode_character_references(strip_initial_newline(body))
                } else {
                    body.to_string()
                };
                if !text.is_empty() {
                    dom.create_text(node, text);
                }
                cursor.read_end_tag()?;
            } else if !is_void_tag(&tag.name) {
                open.push(node);
            }
        } else {
            let text = cursor.take_while(|b| b != b'<');
            dom.create_text(innermost(&open)?, decode_character_references(text));
        }
    }

    dom.initialize_form_control_values();
    dom.normalize_radio_groups()?;
    Ok(dom)
}

fn innermost(open: &[NodeId]) -> Result<NodeId> {
    open.last()
        .copied()
        .ok_or_else(|| Error::HtmlParse("missing parent element".into()))
}

#[derive(Debug)]
struct StartTag {
    name: String,
    attrs: HashMap<String, String>,
    self_closing: bool,
}

/// Forward-only reader over the source.
///
/// It only stops on ASCII delimiters or at the end, so `pos` is always a char
/// boundary when a slice is taken.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        self.src.get(self.pos..).unwrap_or_default()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn looking_at(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn eat(&mut self, prefix: &str) -> bool {
        let found = self.looking_at(prefix);
        if found {
            self.pos += prefix.len();
        }
        found
    }

    fn expect(&mut self, prefix: &str) -> Result<()> {
        if self.eat(prefix) {
            Ok(())
        } else {
            Err(Error::HtmlParse(format!("expected {prefix:?}")))
        }
    }

    fn skip_past(&mut self, needle: &str) -> bool {
        match self.rest().find(needle) {
            Some(offset) => {
                self.pos += offset + needle.len();
                true
            }
            None => false,
        }
    }

    fn skip_ws(&mut self) {
        self.take_while(|b| b.is_ascii_whitespace());
    }

    fn take_while(&mut self, keep: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&keep) {
            self.pos += 1;
        }
        self.src.get(start..self.pos).unwrap_or_default()
    }

    /// An unquoted attribute value, or junk inside a tag.
    fn take_unquoted(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b'>' || self.looking_at("/>") {
                break;
            }
            self.pos += 1;
        }
        self.src.get(start..self.pos).unwrap_or_default()
    }

    fn read_start_tag(&mut self) -> Result<StartTag> {
        self.expect("<")?;
        self.skip_ws();
        let name = self.take_while(is_tag_name_byte).to_ascii_lowercase();
        if name.is_empty() {
            return Err(Error::HtmlParse("empty tag name".into()));
        }

        let mut tag = StartTag {
            name,
            attrs: HashMap::new(),
            self_closing: false,
        };
        loop {
            self.skip_ws();
            if self.eat(">") {
                break;
            }
            if self.eat("/>") {
                tag.self_closing = true;
                break;
            }
            match self.peek() {
                None => {
                    return Err(Error::HtmlParse(format!(
                        "unclosed <{}> start tag",
                        tag.name
                    )));
                }
                Some(b) if is_attr_name_byte(b) => {
                    let name = self.take_while(is_attr_name_byte).to_ascii_lowercase();
                    self.skip_ws();
                    let value = if self.eat("=") {
                        self.skip_ws();
                        self.read_attr_value()?
                    } else {
                        String::new()
                    };
                    // First occurrence wins.
                    tag.attrs.entry(name).or_insert(value);
                }
                Some(_) => {
                    self.take_unquoted();
                }
            }
        }
        Ok(tag)
    }

    fn read_attr_value(&mut self) -> Result<String> {
        let raw = match self.peek() {
            None => return Err(Error::HtmlParse("missing attribute value".into())),
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let value = self.take_while(|b| b != quote);
                if self.at_end() {
                    return Err(Error::HtmlParse("unclosed quoted attribute value".into()));
                }
                self.pos += 1;
                value
            }
            Some(_) => self.take_unquoted(),
        };
        Ok(decode_character_references(raw))
    }

    fn read_end_tag(&mut self) -> Result<String> {
        self.expect("</")?;
        self.skip_ws();
        let name = self.take_while(is_tag_name_byte).to_ascii_lowercase();
        self.take_while(|b| b != b'>');
        if !self.eat(">") {
            return Err(Error::HtmlParse(format!("unclosed </{name}> end tag")));
        }
        Ok(name)
    }

    /// Skips `<!...>`, where a quoted `>` does not end the declaration.
    fn skip_declaration(&mut self) -> Result<()> {
        self.expect("<!")?;
        let mut quote = None;
        while let Some(b) = self.peek() {
            self.pos += 1;
            match (quote, b) {
                (Some(open), b) if b == open => quote = None,
                (Some(_), _) => {}
                (None, b'\'' | b'"') => quote = Some(b),
                (None, b'>') => return Ok(()),
                (None, _) => {}
            }
        }
        Err(Error::HtmlParse("unclosed declaration tag".into()))
    }

    /// Body of a raw-text element, leaving the cursor on its end tag.
    fn raw_text(&mut self, tag: &str) -> Option<&'a str> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let end = (start..bytes.len()).find(|at| closes_raw_text(&bytes[*at..], tag.as_bytes()))?;
        self.pos = end;
        self.src.get(start..end)
    }
}

/// `</tag` followed by anything that cannot continue the name.
fn closes_raw_text(at: &[u8], tag: &[u8]) -> bool {
    let Some(name) = at.strip_prefix(b"</") else {
        return false;
    };
    let name = name.trim_ascii_start();
    name.get(..tag.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(tag))
        && name
            .get(tag.len())
            .is_none_or(|b| !b.is_ascii_alphanumeric())
}

/// `Some(decode_references)` for elements whose body is not markup.
fn raw_text_mode(tag: &str) -> Option<bool> {
    match tag {
        "script" | "style" => Some(false),
        "textarea" | "title" => Some(true),
        _ => None,
    }
}

// A newline right after <textarea> is not part of its value.
fn strip_initial_newline(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}

/// `<option>` closes an open option; `<optgroup>` closes an open option or
/// optgroup. Neither reaches past the enclosing select or datalist.
fn close_implied_option(dom: &Document, open: &mut Vec<NodeId>, tag: &str) {
    if tag != "option" && tag != "optgroup" {
        return;
    }
    for index in (1..open.len()).rev() {
        match dom.tag_name(open[index]) {
            Some("option") => {
                open.truncate(index);
                return;
            }
            Some("optgroup") if tag == "optgroup" => {
                open.truncate(index);
                return;
            }
            Some("optgroup" | "select" | "datalist") => return,
            _ => {}
        }
    }
}

fn decode_character_references(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let name_len = after
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '#'))
            .unwrap_or(after.len());
        match character_reference(&after[..name_len]) {
            Some(ch) => {
                out.push(ch);
                let tail = &after[name_len..];
                rest = tail.strip_prefix(';').unwrap_or(tail);
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn character_reference(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "copy" => '©',
        "reg" => '®',
        "euro" => '€',
        "pound" => '£',
        "yen" => '¥',
        "deg" => '°',
        "plusmn" => '±',
        "times" => '×',
        "divide" => '÷',
        "hellip" => '…',
        _ => return None,
    };
    Some(ch)
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_attr_name_byte(b: u8) -> bool {
    is_tag_name_byte(b) || b == b':'
}

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
