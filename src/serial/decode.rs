/// Incremental UTF-8 decoder for a byte stream.
///
/// A multi-byte character split across two reads is held back until the
/// rest arrives, so the decoded text does not depend on read boundaries.
/// Invalid sequences become U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::with_capacity(self.pending.len());

        loop {
            let stop = match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    None
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    out.push_str(std::str::from_utf8(&self.pending[..valid]).unwrap_or_default());
                    Some((valid, err.error_len()))
                }
            };

            match stop {
                None => {
                    self.pending.clear();
                    return out;
                }
                Some((valid, Some(invalid))) => {
                    out.push(char::REPLACEMENT_CHARACTER);
                    self.pending.drain(..valid + invalid);
                }
                Some((valid, None)) => {
                    // Incomplete sequence at the end; wait for more bytes.
                    self.pending.drain(..valid);
                    return out;
                }
            }
        }
    }
}
