use clz_inflate::{CallbackSink, Inflater};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
struct InflateParams {
    /// Compressed input file: a raw DEFLATE stream, or a gzip file when
    /// `--gzip` is given.
    input: PathBuf,

    /// Output path. Defaults to stripping the input's extension, matching
    /// the original `gzipd` behavior.
    output: Option<PathBuf>,

    /// Strip a gzip (RFC 1952) membership around the DEFLATE payload before
    /// decompressing. This is a thin, non-core convenience: the library
    /// itself never parses container formats.
    #[structopt(long)]
    gzip: bool,

    /// Decompress and discard the output, just checking it succeeds.
    #[structopt(short)]
    simulate: bool,
}

/// Strip a gzip (RFC 1952) header and trailer, returning the raw DEFLATE
/// payload. This lives outside the core crate entirely -- the decompressor
/// never parses container formats itself.
fn strip_gzip_membership(data: &[u8]) -> &[u8] {
    const FHCRC: u8 = 1 << 1;
    const FEXTRA: u8 = 1 << 2;
    const FNAME: u8 = 1 << 3;
    const FCOMMENT: u8 = 1 << 4;

    assert!(data.len() >= 10, "gzip member shorter than its fixed header");
    assert_eq!(&data[0..2], &[0x1f, 0x8b], "not a gzip member (bad magic)");
    assert_eq!(data[2], 8, "unsupported gzip compression method");

    let flg = data[3];
    let mut pos = 10usize;

    if flg & FEXTRA != 0 {
        let xlen = u16::from_le_bytes([data[pos], data[pos + 1]]) as usize;
        pos += 2 + xlen;
    }
    if flg & FNAME != 0 {
        while data[pos] != 0 {
            pos += 1;
        }
        pos += 1;
    }
    if flg & FCOMMENT != 0 {
        while data[pos] != 0 {
            pos += 1;
        }
        pos += 1;
    }
    if flg & FHCRC != 0 {
        pos += 2;
    }

    &data[pos..data.len() - 8]
}

fn main() {
    let params: InflateParams = InflateParams::from_args();

    let raw = fs::read(&params.input).expect("failed to read input file");
    let payload: &[u8] = if params.gzip {
        strip_gzip_membership(&raw)
    } else {
        &raw
    };

    let mut inflater = Inflater::new();

    if params.simulate {
        let mut sink = CallbackSink::new(|bytes: &[u8]| bytes.len());
        inflater.decompress_slice(payload, &mut sink).unwrap();
    } else {
        let out_path = params
            .output
            .unwrap_or_else(|| params.input.with_extension(""));
        let mut write_file = BufWriter::new(File::create(out_path).expect("failed to create output file"));
        let mut sink = CallbackSink::new(|bytes: &[u8]| write_file.write_all(bytes).map(|_| bytes.len()).unwrap_or(0));
        inflater.decompress_slice(payload, &mut sink).unwrap();
    };
}
