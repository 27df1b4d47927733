//! Where program lines come from: a seekable file, or an interactive
//! line editor that can never rewind.

use iox_util::{IoxError, Result, SeekPos};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};

/// A source of program lines. `mark`/`jmp` only work over sources that
/// can report and restore a seek position.
pub trait LineSource {
    /// Returns the next raw line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// The seek position just after the line most recently returned by
    /// `read_line`. Used by `mark` to capture a jump target.
    fn seek_pos(&self) -> SeekPos;

    /// Rewinds to a position previously returned by `seek_pos`.
    fn seek(&mut self, pos: SeekPos) -> Result<()>;

    /// Whether `jmp` is usable over this source.
    fn can_jump(&self) -> bool;
}

/// A script file, readable and seekable: `mark`/`jmp` work here.
pub struct FileSource {
    reader: BufReader<File>,
    position: u64,
}

impl FileSource {
    pub fn open(path: &std::path::Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            position: 0,
        })
    }
}

impl LineSource for FileSource {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        let n = self.reader.read_line(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        self.position = self.reader.stream_position()?;
        Ok(Some(buf))
    }

    fn seek_pos(&self) -> SeekPos {
        SeekPos(self.position)
    }

    fn seek(&mut self, pos: SeekPos) -> Result<()> {
        self.reader
            .seek(SeekFrom::Start(pos.0))
            .map_err(|_| IoxError::MarksUnavailable)?;
        self.position = pos.0;
        Ok(())
    }

    fn can_jump(&self) -> bool {
        true
    }
}

/// An interactive REPL source: every line comes from the line editor and
/// nothing here is seekable.
pub struct ReplSource<F>
where
    F: FnMut() -> io::Result<Option<String>>,
{
    next_line: F,
}

impl<F> ReplSource<F>
where
    F: FnMut() -> io::Result<Option<String>>,
{
    pub fn new(next_line: F) -> Self {
        Self { next_line }
    }
}

impl<F> LineSource for ReplSource<F>
where
    F: FnMut() -> io::Result<Option<String>>,
{
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (self.next_line)()
    }

    fn seek_pos(&self) -> SeekPos {
        SeekPos(0)
    }

    fn seek(&mut self, _pos: SeekPos) -> Result<()> {
        Err(IoxError::MarksUnavailable)
    }

    fn can_jump(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_source_reads_lines_and_tracks_position() {
        let mut path = std::env::temp_dir();
        path.push(format!("iox-test-{}.iox", std::process::id()));
        {
            let mut f = File::create(&path).unwrap();
            writeln!(f, "1 out").unwrap();
            writeln!(f, "2 out").unwrap();
        }
        let mut src = FileSource::open(&path).unwrap();
        assert_eq!(src.read_line().unwrap(), Some("1 out".to_string()));
        let mark = src.seek_pos();
        assert_eq!(src.read_line().unwrap(), Some("2 out".to_string()));
        assert_eq!(src.read_line().unwrap(), None);
        src.seek(mark).unwrap();
        assert_eq!(src.read_line().unwrap(), Some("2 out".to_string()));
        assert!(src.can_jump());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn repl_source_cannot_seek() {
        let mut src = ReplSource::new(|| Ok(Some("1 out".to_string())));
        assert!(!src.can_jump());
        assert_eq!(src.seek(SeekPos(0)).unwrap_err(), IoxError::MarksUnavailable);
    }
}
