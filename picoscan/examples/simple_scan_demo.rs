// Example scanning typed values out of an in-memory string

use picoscan::{scan, scan_args, ScanError};

fn main() -> Result<(), ScanError> {
    println!("picoscan simple demo");
    println!("====================");

    let input = "sensor-7 0x1f -12 21.5 true";
    println!("Input: {input:?}");

    let mut name = String::new();
    let mut id = 0u32;
    let mut offset = 0i16;
    let mut reading = 0f64;
    let mut enabled = false;

    let result = scan(
        input,
        "{} {x} {} {} {}",
        scan_args![&mut name, &mut id, &mut offset, &mut reading, &mut enabled],
    );
    let consumed = result.into_result()?;

    println!("  name     = {name}");
    println!("  id       = {id}");
    println!("  offset   = {offset}");
    println!("  reading  = {reading}");
    println!("  enabled  = {enabled}");
    println!("Consumed {consumed} of {} bytes", input.len());

    // A failing field reports where it started and leaves its target alone
    let mut small = 0u8;
    let result = scan("300", "{}", scan_args![&mut small]);
    if let Some(err) = result.error() {
        println!("Scanning 300 into u8: {err} at offset {}", result.position());
    }
    Ok(())
}
