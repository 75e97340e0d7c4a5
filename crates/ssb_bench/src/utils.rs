//! Benchmark utilities.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate random text of the specified size, free of braces.
pub fn random_text(size: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .map(char::from)
        .collect()
}

/// Generate a template of roughly `size` bytes with one tag per
/// `literal_len` bytes of text.
pub fn random_template(size: usize, literal_len: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(size + 32);
    let mut tag = 0usize;

    while out.len() < size {
        out.push_str(&random_text(literal_len.max(1)));
        let name_len = rng.gen_range(3..16);
        out.push_str("{{");
        out.push_str(&format!("t{tag}_"));
        out.push_str(&random_text(name_len));
        out.push_str("}}");
        tag += 1;
    }

    out
}

/// Generate a template with no tags at all.
pub fn plain_template(size: usize) -> String {
    random_text(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_have_the_requested_shape() {
        let template = random_template(1024, 32);
        assert!(template.len() >= 1024);
        assert!(template.contains("{{t0_"));
        assert!(!plain_template(256).contains('{'));
    }
}
