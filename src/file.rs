//! Compress and decompress files next to their source.
//!
//! `dir/name` compresses to `dir/<prefix>name`; decompression strips the
//! prefix again. The codec itself never touches the filesystem.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::codec;
use crate::config::Config;
use crate::error::{Error, Result};

/// Compress `path`, returning the path written.
///
/// # Errors
/// Returns `Error::InvalidConfig` for an empty prefix, which would make the
/// target the source itself.
pub fn compress_file(config: &Config, path: &Path) -> Result<PathBuf> {
    check_prefix(config)?;
    let name = file_name(path)?;
    let target = path.with_file_name(format!("{}{}", config.prefix, name));

    let data = fs::read(path)?;
    // Encode fully before creating the target so a failure writes nothing.
    let blob = codec::encode(&data)?;
    write_or_remove(&target, create(config, &target)?, &blob)?;

    log::debug!("compressed {} -> {}", path.display(), target.display());
    Ok(target)
}

/// Decompress `path`, returning the path written.
///
/// # Errors
/// Returns `Error::InvalidConfig` for an empty prefix and
/// `Error::MissingPrefix` if the file name does not start with the prefix.
pub fn decompress_file(config: &Config, path: &Path) -> Result<PathBuf> {
    check_prefix(config)?;
    let name = file_name(path)?;
    let stripped = match name.strip_prefix(config.prefix.as_str()) {
        Some(rest) if !rest.is_empty() => rest,
        _ => {
            return Err(Error::MissingPrefix {
                name: name.to_string(),
                prefix: config.prefix.clone(),
            })
        }
    };
    let target = path.with_file_name(stripped);

    let blob = fs::read(path)?;
    // Decode fully before creating the target so a bad frame writes nothing.
    let data = codec::decode(&blob)?;
    write_or_remove(&target, create(config, &target)?, &data)?;

    log::debug!("decompressed {} -> {}", path.display(), target.display());
    Ok(target)
}

fn check_prefix(config: &Config) -> Result<()> {
    if config.prefix.is_empty() {
        return Err(Error::InvalidConfig("file name prefix is empty"));
    }
    Ok(())
}

/// Write `bytes` through `out`; on failure remove the partial `target`.
fn write_or_remove<W: Write>(target: &Path, out: W, bytes: &[u8]) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    let written = out.write_all(bytes).and_then(|()| out.flush());
    if written.is_err() {
        let _ = fs::remove_file(target);
    }
    written
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no usable file name", path.display()),
            ))
        })
}

fn create(config: &Config, target: &Path) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.write(true);
    if config.overwrite {
        opts.create(true).truncate(true);
    } else {
        opts.create_new(true);
    }
    opts.open(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("canonhuff-file-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_compress_then_decompress() {
        let dir = scratch_dir("roundtrip");
        let source = dir.join("notes.txt");
        fs::write(&source, b"the quick brown fox jumps over the lazy dog").unwrap();

        let config = Config::default();
        let packed = compress_file(&config, &source).unwrap();
        assert_eq!(packed, dir.join("huffman_notes.txt"));

        fs::remove_file(&source).unwrap();
        let restored = decompress_file(&config, &packed).unwrap();
        assert_eq!(restored, source);
        assert_eq!(
            fs::read(&restored).unwrap(),
            b"the quick brown fox jumps over the lazy dog".to_vec()
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = scratch_dir("overwrite");
        let source = dir.join("a.bin");
        fs::write(&source, [1u8, 2, 3]).unwrap();
        fs::write(dir.join("huffman_a.bin"), b"keep").unwrap();

        let err = compress_file(&Config::default(), &source).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::AlreadyExists));
        assert_eq!(fs::read(dir.join("huffman_a.bin")).unwrap(), b"keep".to_vec());

        let config = Config::default().with_overwrite(true);
        compress_file(&config, &source).unwrap();
        assert_ne!(fs::read(dir.join("huffman_a.bin")).unwrap(), b"keep".to_vec());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        let dir = scratch_dir("empty-prefix");
        let source = dir.join("x.txt");
        fs::write(&source, b"keep me").unwrap();

        let config = Config::default().with_prefix("").with_overwrite(true);
        assert!(matches!(
            compress_file(&config, &source),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            decompress_file(&config, &source),
            Err(Error::InvalidConfig(_))
        ));
        assert_eq!(fs::read(&source).unwrap(), b"keep me".to_vec());
        fs::remove_dir_all(&dir).unwrap();
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_leaves_no_target() {
        let dir = scratch_dir("failed-write");
        let target = dir.join("huffman_y.bin");
        fs::write(&target, b"partial").unwrap();

        let err = write_or_remove(&target, FailingWriter, &[1, 2, 3]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(!target.exists());

        write_or_remove(&target, File::create(&target).unwrap(), &[1, 2, 3]).unwrap();
        assert_eq!(fs::read(&target).unwrap(), vec![1, 2, 3]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_prefix() {
        let dir = scratch_dir("prefix");
        let packed = dir.join("plain.bin");
        fs::write(&packed, [0u8, 0]).unwrap();

        let err = decompress_file(&Config::default(), &packed).unwrap_err();
        assert!(matches!(err, Error::MissingPrefix { .. }));

        let config = Config::default().with_prefix("pl");
        let restored = decompress_file(&config, &packed).unwrap();
        assert_eq!(restored, dir.join("ain.bin"));
        assert!(fs::read(&restored).unwrap().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }
}
