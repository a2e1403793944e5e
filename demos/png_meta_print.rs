use inscribe::png::{text_chunks, validate, PngRawChunkIter, DEFAULT_MAX_SIZE_BYTES};

/// Prints the chunks and text of each PNG named on the command line.
///
/// `png_meta_print --tag <json> <in.png> <out.png>` instead writes a copy of
/// `in.png` with the JSON embedded.
fn main() {
  let args: Vec<String> = std::env::args().collect();
  println!("ARGS: {args:?}");
  if let [_, flag, json, src, dst] = args.as_slice() {
    if flag == "--tag" {
      tag_file(json, src, dst);
      return;
    }
  }
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e:?}");
        continue;
      }
    };
    if let Err(e) = validate(&bytes, DEFAULT_MAX_SIZE_BYTES) {
      println!("Not a usable PNG: {e}");
      continue;
    }
    let mut it = PngRawChunkIter::new(&bytes);
    for (n, raw_chunk) in it.by_ref().enumerate() {
      let crc = if raw_chunk.crc_is_valid() { "ok" } else { "BAD" };
      println!("{n}: {raw_chunk:?} crc:{crc}");
    }
    println!("stream: {:?}", it.state());
    for text in text_chunks(&bytes) {
      println!(
        "tEXt `{}`: {}",
        String::from_utf8_lossy(text.keyword),
        String::from_utf8_lossy(text.text)
      );
    }
    match inscribe::extract::<serde_json::Value>(&bytes) {
      Some(value) => println!("metadata: {value}"),
      None => println!("metadata: none"),
    }
  }
}

fn tag_file(json: &str, src: &str, dst: &str) {
  let value: serde_json::Value = match serde_json::from_str(json) {
    Ok(v) => v,
    Err(e) => return println!("Bad JSON: {e}"),
  };
  let bytes = match std::fs::read(src) {
    Ok(bytes) => bytes,
    Err(e) => return println!("{src}: {e:?}"),
  };
  match inscribe::embed(&bytes, &value) {
    Ok(tagged) => match std::fs::write(dst, &tagged) {
      Ok(()) => println!("Wrote {} bytes to `{dst}`.", tagged.len()),
      Err(e) => println!("{dst}: {e:?}"),
    },
    Err(e) => println!("{src}: {e}"),
  }
}
