//! Basic usage example for the ManifoldDB codec.
//!
//! This example demonstrates:
//! - Packing a record into a compact byte vector and reading it back
//! - Building sortable index keys
//! - How a mismatched read surfaces as a single error at the end
//!
//! Run with: `RUST_LOG=manifoldb_codec=trace cargo run --example basic_usage`

use chrono::{TimeZone, Utc};
use manifoldb_codec::{CodecError, GetBuffer, KeyBuffer, PutBuffer};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("manifoldb_codec=debug".parse()?),
        )
        .init();

    println!("ManifoldDB Codec Basic Usage Example");
    println!("====================================\n");

    // Pack a few fields
    let created = Utc
        .with_ymd_and_hms(1997, 11, 28, 12, 0, 0)
        .single()
        .ok_or("invalid date")?;
    let mut put = PutBuffer::new();
    put.put_u64(3_565_123_234_760)
        .put_i64(-50_496_192_383)
        .put_str("example")
        .put_timestamp(&created);
    let data = put.finish()?;
    println!("Packed {} bytes: {}", data.len(), hex(&data));

    // Read them back in the same order
    let (mut id, mut delta, mut name, mut when) = (0u64, 0i64, String::new(), Utc::now());
    let mut get = GetBuffer::new(&data);
    get.get_u64(&mut id).get_i64(&mut delta).get_str(&mut name).get_timestamp(&mut when);
    get.done()?;
    println!("Unpacked: id={id} delta={delta} name={name:?} created={when}\n");

    // Build index keys that sort like their fields
    let mut keys = Vec::new();
    for (score, name) in [(10i64, "carol"), (-3, "alice"), (10, "bob")] {
        let mut kb = KeyBuffer::new();
        kb.put_i64(score).put_str(name, 8);
        keys.push((kb.finish()?, score, name));
    }
    keys.sort();
    println!("Keys in byte order:");
    for (key, score, name) in &keys {
        println!("  {} -> ({score}, {name})", hex(key));
    }
    println!();

    // A read past the end is reported once, by done()
    let mut put = PutBuffer::new();
    put.put_u32(5);
    let data = put.finish()?;
    let (mut first, mut second) = (0u32, 0u32);
    let mut get = GetBuffer::new(&data);
    get.get_u32(&mut first).get_u32(&mut second);
    match get.done() {
        Err(err @ CodecError::UnexpectedEndOfData { .. }) => println!("Expected failure: {err}"),
        other => println!("Unexpected result: {other:?}"),
    }

    Ok(())
}
