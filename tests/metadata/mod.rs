use inscribe::png::{text_chunks, write_text_chunk, Keyword, PngChunkType, PngRawChunkIter};
use inscribe::{
  embed, embed_text, extract, extract_text, EmbedError, ExtractError, MetadataCodec,
  StructuralError, DEFAULT_KEYWORD,
};
use rstest::rstest;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::MINIMAL_PNG;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Preset {
  version: u32,
  #[serde(rename = "type")]
  kind: String,
  data: PresetData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PresetData {
  name: String,
}

fn rin() -> Preset {
  Preset { version: 1, kind: "preset".into(), data: PresetData { name: "Rin".into() } }
}

#[test]
fn test_preset_scenario() {
  let payload = r#"{"version":1,"type":"preset","data":{"name":"Rin"}}"#;
  let tagged = embed_text(&MINIMAL_PNG, payload).unwrap();
  assert_eq!(tagged.len(), MINIMAL_PNG.len() + 12 + DEFAULT_KEYWORD.len() + 1 + payload.len());
  assert_eq!(extract::<Preset>(&tagged), Some(rin()));
  assert_eq!(extract::<Value>(&tagged), Some(serde_json::from_str::<Value>(payload).unwrap()));
  // serde_json writes struct fields in declaration order, so this is the same text
  assert_eq!(embed(&MINIMAL_PNG, &rin()).unwrap(), tagged);
}

#[rstest]
#[case::number(json!(7))]
#[case::string(json!("just text"))]
#[case::unicode(json!({"name": "凛", "note": "emoji 🐈 and\nnewline"}))]
#[case::nested(json!({"version": 2, "type": "memory", "data": [1, 2, {"k": null}]}))]
#[case::contains_nul(json!({"nul": "a\u{0}b"}))]
fn test_round_trip(#[case] value: Value) {
  let tagged = embed(&MINIMAL_PNG, &value).unwrap();
  assert_eq!(extract::<Value>(&tagged), Some(value));
}

#[test]
fn test_embed_is_non_destructive() {
  let tagged = embed_text(&MINIMAL_PNG, "payload").unwrap();
  let iend = 55;
  let inserted = tagged.len() - MINIMAL_PNG.len();
  assert_eq!(&tagged[..iend], &MINIMAL_PNG[..iend]);
  assert_eq!(&tagged[iend + inserted..], &MINIMAL_PNG[iend..]);

  let before: Vec<_> = PngRawChunkIter::new(&MINIMAL_PNG).map(|c| (c.type_(), c.data())).collect();
  let after: Vec<_> = PngRawChunkIter::new(&tagged)
    .filter(|c| c.type_() != PngChunkType::tEXt)
    .map(|c| (c.type_(), c.data()))
    .collect();
  assert_eq!(before, after);
  // the inserted chunk is second to last and has a good CRC
  let chunks: Vec<_> = PngRawChunkIter::new(&tagged).collect();
  assert_eq!(chunks.len(), 4);
  assert_eq!(chunks[2].type_(), PngChunkType::tEXt);
  assert!(chunks[2].crc_is_valid());
  assert_eq!(chunks[3].type_(), PngChunkType::IEND);
}

#[test]
fn test_bytes_after_iend_are_kept() {
  let mut png = MINIMAL_PNG.to_vec();
  png.extend_from_slice(b"trailing junk");
  let tagged = embed_text(&png, "x").unwrap();
  assert!(tagged.ends_with(b"IEND\xAE\x42\x60\x82trailing junk"));
  assert_eq!(extract_text(&tagged), Some("x"));
}

#[test]
fn test_first_embedded_value_wins() {
  let v1 = json!({"version": 1});
  let v2 = json!({"version": 2});
  let once = embed(&MINIMAL_PNG, &v1).unwrap();
  let twice = embed(&once, &v2).unwrap();
  assert_eq!(extract::<Value>(&twice), Some(v1));
  let texts: Vec<_> = text_chunks(&twice).map(|t| t.text).collect();
  assert_eq!(texts, [&br#"{"version":1}"#[..], &br#"{"version":2}"#[..]]);
}

#[rstest]
#[case::plain_png(MINIMAL_PNG.to_vec())]
#[case::empty(vec![])]
#[case::not_a_png(b"GIF89a, definitely not a png".to_vec())]
#[case::signature_only(MINIMAL_PNG[..8].to_vec())]
#[case::truncated(MINIMAL_PNG[..40].to_vec())]
fn test_nothing_to_extract(#[case] bytes: Vec<u8>) {
  assert_eq!(extract_text(&bytes), None);
  assert_eq!(extract::<Value>(&bytes), None);
}

#[test]
fn test_other_keywords_are_ignored() {
  for kw in [&b"Comment"[..], b"Persona", b"persona ai", b"personas"] {
    let codec = MetadataCodec::default().with_keyword(Keyword::new(kw).unwrap());
    let tagged = codec.embed_text(&MINIMAL_PNG, "{}").unwrap();
    assert_eq!(extract_text(&tagged), None, "{}", String::from_utf8_lossy(kw));
    assert_eq!(
      MetadataCodec::default().try_extract_text(&tagged),
      Err(ExtractError::NotFound)
    );
  }
}

#[test]
fn test_bad_json_is_not_found() {
  let tagged = embed_text(&MINIMAL_PNG, "{not json").unwrap();
  assert_eq!(extract_text(&tagged), Some("{not json"));
  assert_eq!(extract::<Value>(&tagged), None);
  assert!(matches!(
    MetadataCodec::default().try_extract::<Value>(&tagged),
    Err(ExtractError::Json { line: 1, .. })
  ));
  // valid JSON, wrong shape
  let tagged = embed(&MINIMAL_PNG, &json!({"version": "one"})).unwrap();
  assert_eq!(extract::<Preset>(&tagged), None);
}

#[rstest]
#[case::empty(vec![], EmbedError::Structural(StructuralError::Empty))]
#[case::short(MINIMAL_PNG[..5].to_vec(), EmbedError::Structural(StructuralError::BadSignature))]
#[case::no_signature(
  b"\x89PNX\r\n\x1a\nrest".to_vec(),
  EmbedError::Structural(StructuralError::BadSignature)
)]
#[case::no_iend(MINIMAL_PNG[..55].to_vec(), EmbedError::MissingTerminator)]
#[case::truncated(MINIMAL_PNG[..60].to_vec(), EmbedError::MissingTerminator)]
#[case::signature_only(MINIMAL_PNG[..8].to_vec(), EmbedError::MissingTerminator)]
fn test_embed_fails_hard(#[case] bytes: Vec<u8>, #[case] expected: EmbedError) {
  assert_eq!(embed_text(&bytes, "payload"), Err(expected.clone()));
  assert_eq!(embed(&bytes, &json!({"a": 1})), Err(expected));
}

#[test]
fn test_embed_serialize_failure() {
  use std::collections::BTreeMap;
  // JSON object keys must be strings
  let mut map = BTreeMap::new();
  map.insert(vec![1_u8], 2_u8);
  assert!(matches!(embed(&MINIMAL_PNG, &map), Err(EmbedError::Serialize(_))));
}

#[test]
fn test_strip_then_embed_replaces() {
  let codec = MetadataCodec::default();
  let old = embed(&MINIMAL_PNG, &json!("old")).unwrap();
  let new = codec.embed(&codec.strip(&old).unwrap(), &json!("new")).unwrap();
  assert_eq!(extract::<Value>(&new), Some(json!("new")));
  assert_eq!(codec.strip(&new).unwrap(), MINIMAL_PNG);
}

#[test]
fn test_strip_keeps_other_text_chunks() {
  let comment = MetadataCodec::default().with_keyword(Keyword::new(b"Comment").unwrap());
  let png = embed_text(&MINIMAL_PNG, "ours").unwrap();
  let png = comment.embed_text(&png, "theirs").unwrap();
  let stripped = MetadataCodec::default().strip(&png).unwrap();
  assert_eq!(stripped, comment.embed_text(&MINIMAL_PNG, "theirs").unwrap());
}

#[test]
fn test_reserved_chunk_after_iend_is_ignored() {
  let codec = MetadataCodec::default();
  let mut png = MINIMAL_PNG.to_vec();
  write_text_chunk(&mut png, codec.keyword(), b"\"late\"").unwrap();
  assert_eq!(extract::<Value>(&png), None);
  assert_eq!(text_chunks(&png).count(), 0);
  // strip leaves trailing data alone, and extraction still doesn't see it
  let stripped = codec.strip(&png).unwrap();
  assert_eq!(stripped, png);
  assert_eq!(extract::<Value>(&stripped), None);
  let tagged = embed(&png, &json!("early")).unwrap();
  assert_eq!(extract::<Value>(&tagged), Some(json!("early")));
  assert_eq!(text_chunks(&tagged).count(), 1);
  assert_eq!(codec.strip(&tagged).unwrap(), png);
}
