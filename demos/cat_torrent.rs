use std::{env, fs};

use anyhow::{bail, Context};
use bytes::Bytes;
use ez_bdecode::{decode_buffer, map_target, map_to};

map_target! {
    #[derive(Debug, Default)]
    struct FileEntry {
        length: u64,
        path: Vec<String>,
    }
}

map_target! {
    #[derive(Debug, Default)]
    struct Info {
        name: String,
        piece_length: u64 => "piece length",
        pieces: Bytes,
        length: Option<u64>,
        files: Vec<FileEntry>,
    }
}

map_target! {
    #[derive(Debug, Default)]
    struct Metainfo {
        announce: String,
        announce_list: Vec<Vec<String>> => "announce-list",
        comment: Option<String>,
        created_by: Option<String> => "created by",
        creation_date: Option<i64> => "creation date",
        info: Info,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cat_torrent");
    let Some(file_path) = args.get(1) else {
        bail!("Usage: {program} <file_path>");
    };

    let buffer = fs::read(file_path).with_context(|| format!("failed to read {file_path}"))?;

    let root = decode_buffer(&buffer).context("failed to decode torrent")?;
    println!("{}", root.to_json_pretty());

    let mut metainfo = Metainfo::default();
    map_to(&root, &mut metainfo).context("failed to map torrent")?;

    let info = &metainfo.info;
    println!("name:         {}", info.name);
    println!("announce:     {}", metainfo.announce);
    println!("piece length: {}", info.piece_length);
    println!("pieces:       {}", info.pieces.len() / 20);
    match info.length {
        Some(length) => println!("length:       {length}"),
        None => {
            for file in &info.files {
                println!("file:         {} ({})", file.path.join("/"), file.length);
            }
        }
    }

    Ok(())
}
