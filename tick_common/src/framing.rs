//! Newline-delimited framing over a byte stream.
//!
//! Both directions of the wire protocol carry UTF-8 text messages terminated
//! by `\n`. TCP delivers those messages in arbitrary chunks, so the receive
//! path keeps a growable byte buffer and extracts complete lines from it as
//! data arrives. All framing state lives in the caller's buffer, which makes
//! `extract_lines` restartable across any chunk boundary — including one that
//! falls inside a multi-byte UTF-8 sequence, since text decoding happens only
//! per extracted line.

/// Encodes a single message as UTF-8 bytes with a trailing `\n`.
///
/// The caller guarantees `text` contains no embedded newlines (JSON
/// serialization and validated command lines both do).
pub fn encode_line(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() + 1);
    bytes.extend_from_slice(text.as_bytes());
    bytes.push(b'\n');
    bytes
}

/// Appends `new_bytes` to `buffer` and extracts every complete line.
///
/// Lines are consumed left to right, earliest newline first, which preserves
/// arrival order. Each extracted segment is trimmed of surrounding whitespace
/// (covering `\r\n` terminators as well); empty and whitespace-only segments
/// are silently dropped. Bytes after the last newline stay in `buffer` until
/// a later call completes them.
pub fn extract_lines(buffer: &mut Vec<u8>, new_bytes: &[u8]) -> Vec<String> {
    buffer.extend_from_slice(new_bytes);

    let mut lines = Vec::new();
    while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
        let segment: Vec<u8> = buffer.drain(..=pos).collect();
        let text = String::from_utf8_lossy(&segment[..pos]);
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_all(chunks: &[&[u8]]) -> Vec<String> {
        let mut buffer = Vec::new();
        let mut lines = Vec::new();
        for chunk in chunks {
            lines.extend(extract_lines(&mut buffer, chunk));
        }
        lines
    }

    #[test]
    fn encode_appends_single_newline() {
        assert_eq!(encode_line("CLOSE"), b"CLOSE\n");
        assert_eq!(encode_line(""), b"\n");
    }

    #[test]
    fn extracts_multiple_lines_from_one_chunk() {
        let mut buffer = Vec::new();
        let lines = extract_lines(&mut buffer, b"BUY 1.5\nSELL 0.1\n");
        assert_eq!(lines, vec!["BUY 1.5", "SELL 0.1"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn keeps_partial_line_until_completed() {
        let mut buffer = Vec::new();
        assert!(extract_lines(&mut buffer, b"BUY 1").is_empty());
        assert_eq!(buffer, b"BUY 1");
        let lines = extract_lines(&mut buffer, b".5 10 20\nSEL");
        assert_eq!(lines, vec!["BUY 1.5 10 20"]);
        assert_eq!(buffer, b"SEL");
    }

    #[test]
    fn drops_empty_and_whitespace_only_lines() {
        let mut buffer = Vec::new();
        let lines = extract_lines(&mut buffer, b"\n   \n\t\nCLOSE\n");
        assert_eq!(lines, vec!["CLOSE"]);
    }

    #[test]
    fn trims_carriage_returns_and_padding() {
        let mut buffer = Vec::new();
        let lines = extract_lines(&mut buffer, b"  BUY 0.1  \r\nCLOSE\r\n");
        assert_eq!(lines, vec!["BUY 0.1", "CLOSE"]);
    }

    #[test]
    fn chunk_boundaries_do_not_change_the_extracted_lines() {
        let stream = "BUY 1.5 10 20\nSELL 0.1\n\n  \nCLOSE\npartial".as_bytes();
        let expected = collect_all(&[stream]);
        assert_eq!(expected, vec!["BUY 1.5 10 20", "SELL 0.1", "CLOSE"]);

        for split in 0..=stream.len() {
            let (a, b) = stream.split_at(split);
            assert_eq!(collect_all(&[a, b]), expected, "split at {}", split);
        }
        // One-byte-at-a-time delivery.
        let singles: Vec<&[u8]> = stream.chunks(1).collect();
        assert_eq!(collect_all(&singles), expected);
    }

    #[test]
    fn split_inside_a_multibyte_sequence_survives() {
        let stream = "héllo\nCLOSE\n".as_bytes();
        let expected = collect_all(&[stream]);
        for split in 0..=stream.len() {
            let (a, b) = stream.split_at(split);
            assert_eq!(collect_all(&[a, b]), expected, "split at {}", split);
        }
    }
}
