//! Byte-for-byte file comparison.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

const CHUNK: usize = 64 * 1024;

/// True when both files have exactly the same bytes.
/// Lengths are checked first; contents are streamed in fixed-size chunks.
pub fn same_contents(a: &Path, b: &Path) -> io::Result<bool> {
    let fa = File::open(a)?;
    let fb = File::open(b)?;
    if fa.metadata()?.len() != fb.metadata()?.len() {
        return Ok(false);
    }

    let mut ra = BufReader::with_capacity(CHUNK, fa);
    let mut rb = BufReader::with_capacity(CHUNK, fb);
    let mut buf_a = vec![0u8; CHUNK];
    let mut buf_b = vec![0u8; CHUNK];

    loop {
        let n = read_full(&mut ra, &mut buf_a)?;
        let m = read_full(&mut rb, &mut buf_b)?;
        if n != m || buf_a[..n] != buf_b[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as possible; returns fewer bytes only at EOF.
fn read_full(r: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
