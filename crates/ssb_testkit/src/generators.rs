//! Property-based test generators using proptest.
//!
//! Templates are built from pieces so that both well-formed and malformed
//! sigil arrangements show up often, which a plain byte strategy would
//! rarely produce.

use proptest::prelude::*;

/// One building block of a generated template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Text containing no `{` or `}`.
    Text(String),
    /// A well-formed `{{name}}` tag.
    Tag(String),
    /// A stray `{{`.
    Open,
    /// A stray `}}`.
    Close,
    /// A single `{` or `}`.
    Brace(char),
}

impl Piece {
    fn render(&self, out: &mut String) {
        match self {
            Self::Text(s) => out.push_str(s),
            Self::Tag(name) => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
            Self::Open => out.push_str("{{"),
            Self::Close => out.push_str("}}"),
            Self::Brace(c) => out.push(*c),
        }
    }
}

/// Renders pieces into one template string.
pub fn render(pieces: &[Piece]) -> String {
    let mut out = String::new();
    for piece in pieces {
        piece.render(&mut out);
    }
    out
}

/// Strategy for text without braces.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 <>/=\"\n\t.,!-]{1,24}").expect("Invalid regex")
}

/// Strategy for tag names (possibly empty, never containing `}`).
pub fn tag_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("([a-z_][a-z0-9_.]{0,15})?").expect("Invalid regex")
}

/// Strategy for one template piece.
pub fn piece_strategy() -> impl Strategy<Value = Piece> {
    prop_oneof![
        4 => text_strategy().prop_map(Piece::Text),
        4 => tag_name_strategy().prop_map(Piece::Tag),
        1 => Just(Piece::Open),
        1 => Just(Piece::Close),
        1 => prop_oneof![Just('{'), Just('}')].prop_map(Piece::Brace),
    ]
}

/// Strategy for arbitrary templates, well-formed or not.
pub fn template_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(piece_strategy(), 0..16).prop_map(|pieces| render(&pieces))
}

/// Strategy for well-formed templates: text and complete tags only.
///
/// Returns the rendered template and the expected number of segments.
pub fn well_formed_template_strategy() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec(
        prop_oneof![
            text_strategy().prop_map(Piece::Text),
            tag_name_strategy().prop_map(Piece::Tag),
        ],
        1..16,
    )
    .prop_map(|pieces| {
        // Adjacent text pieces merge into one literal
        let mut segments = 0;
        let mut last_was_text = false;
        for piece in &pieces {
            let is_text = matches!(piece, Piece::Text(_));
            if !(is_text && last_was_text) {
                segments += 1;
            }
            last_was_text = is_text;
        }
        (render(&pieces), segments)
    })
}

/// Strategy for templates without any `{{`.
pub fn sigil_free_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..512).prop_map(|mut bytes| {
        for i in 1..bytes.len() {
            if bytes[i - 1] == b'{' && bytes[i] == b'{' {
                bytes[i] = b'x';
            }
        }
        bytes
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_pieces() {
        let pieces = [
            Piece::Text("Hi ".into()),
            Piece::Tag("name".into()),
            Piece::Brace('}'),
            Piece::Open,
        ];
        assert_eq!(render(&pieces), "Hi {{name}}}{{");
    }

    proptest! {
        #[test]
        fn sigil_free_has_no_open_sigil(bytes in sigil_free_strategy()) {
            prop_assert!(!bytes.windows(2).any(|w| w == b"{{"));
        }
    }
}
