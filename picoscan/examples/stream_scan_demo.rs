// Example scanning records from a source that delivers small chunks

use picoscan::{scan_args, vscan_at, ChunkReader, LocaleRef, ScanBuffer, ScanOptions};

fn main() {
    println!("picoscan streaming demo");
    println!("=======================");

    let data = b"1 alpha 2.5\n2 beta 0.25\n3 gamma 1e3\n";
    // Pretend the input arrives in 5 byte packets
    let reader = ChunkReader::new(data, 5);
    let buffer = ScanBuffer::from_reader(reader);
    let options = ScanOptions::default();

    let mut cursor = buffer.get_forward_range();
    loop {
        let mut id = 0u32;
        let mut label = String::new();
        let mut weight = 0f64;
        let result = vscan_at(
            cursor.clone(),
            "{} {} {}",
            scan_args![&mut id, &mut label, &mut weight],
            &options,
            LocaleRef::classic(),
        );
        match result.error() {
            None => println!("  record {id}: {label} weighs {weight}"),
            Some(err) => {
                println!("Stopped after {} fields: {err}", result.fields_scanned());
                break;
            }
        }
        match buffer.cursor_at(result.position()) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    println!("Pulled {} chunks from the reader", buffer.chunk_count());
}
