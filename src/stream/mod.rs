use crate::eval::Expression;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

pub const CHUNK_SIZE: usize = 2048;

/// A byte source read in chunks. A read of zero bytes signals end of stream.
pub trait ChunkSource {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<R: Read> ChunkSource for R {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

/// Open a file for reading. The handle closes when dropped.
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<File> {
    File::open(path.as_ref()).with_context(|| format!("Failed to open {:?}", path.as_ref()))
}

/// Copy a source into a sink chunk by chunk. Returns the number of bytes copied.
pub fn copy_chunks<S: ChunkSource, W: Write>(source: &mut S, sink: &mut W) -> io::Result<u64> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let count = source.read_chunk(&mut buf)?;
        if count == 0 {
            break;
        }
        sink.write_all(&buf[..count])?;
        total += count as u64;
    }

    sink.flush()?;
    Ok(total)
}

/// Read one expression per non-blank line. Lines starting with `#` are skipped.
pub fn read_expressions<S: ChunkSource>(source: &mut S) -> Result<Vec<Expression>> {
    let mut data = Vec::new();
    copy_chunks(source, &mut data).context("Failed to read expressions")?;

    let text = String::from_utf8(data).context("Expression input is not valid UTF-8")?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Expression::parse)
        .collect())
}

/// Load expressions from a file.
pub fn load_expressions<P: AsRef<Path>>(path: P) -> Result<Vec<Expression>> {
    let mut file = open_file(path.as_ref())?;
    read_expressions(&mut file)
        .with_context(|| format!("Failed to load expressions from {:?}", path.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    /// Hands out at most three bytes per read.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.0.len().min(buf.len()).min(3);
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_copy_larger_than_one_chunk() {
        let data = vec![b'x'; CHUNK_SIZE * 2 + 17];
        let mut sink = Vec::new();

        let copied = copy_chunks(&mut data.as_slice(), &mut sink).unwrap();

        assert_eq!(copied, data.len() as u64);
        assert_eq!(sink, data);
    }

    #[test]
    fn test_read_expressions_from_short_reads() {
        let input = b"# sample\n10 + 5\n\n   two + zero  \n5\n";
        let exprs = read_expressions(&mut Trickle(input)).unwrap();

        assert_eq!(
            exprs,
            vec![
                Expression::parse("10 + 5"),
                Expression::parse("two + zero"),
                Expression::parse("5"),
            ]
        );
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let mut input = Cursor::new(vec![b'1', b' ', 0xff, b'\n']);
        assert!(read_expressions(&mut input).is_err());
    }

    #[test]
    fn test_load_expressions_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("exprs.txt");
        std::fs::write(&path, "3 * 7\n16 / 2\n").unwrap();

        let exprs = load_expressions(&path).unwrap();
        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[1].to_string(), "16 / 2");

        assert!(load_expressions(temp_dir.path().join("missing.txt")).is_err());
    }
}
