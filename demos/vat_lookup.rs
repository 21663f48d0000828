use grenzvat::lookup::*;

#[tokio::main]
async fn main() {
    // Format validation (no network required)
    println!("=== VAT identifier format validation ===\n");

    let test_ids = [
        "DE123456789",
        "ATU12345678",
        "FR12345678901",
        "NL123456789B01",
        "GB123456789",
        "DE12345678",  // too short
        "XX999999999", // unknown country
    ];

    for id in &test_ids {
        match validate_vat_format(id) {
            Ok((cc, num)) => println!("  {id} => valid (country={cc}, number={num})"),
            Err(e) => println!("  {id} => INVALID: {e}"),
        }
    }

    // Registry dispatch
    println!("\n=== Registry dispatch ===\n");
    for cc in ["DE", "GR", "MC", "GB", "EG", "US"] {
        println!("  {cc} => {:?}", registry_for(cc));
    }

    // Live registry check (requires network; HMRC also needs credentials
    // in GRENZVAT_UK_CLIENT_ID / GRENZVAT_UK_CLIENT_SECRET)
    if let Some(vat_id) = std::env::args().nth(1) {
        println!("\n=== Registry check: {vat_id} ===\n");
        match validate_vat_format(&vat_id) {
            Ok((cc, num)) => {
                let result = check_identifier(num, cc, false).await;
                println!("  is_valid: {:?}", result.is_valid);
                if let Some(name) = &result.business_name {
                    println!("  name:     {name}");
                }
                if let Some(address) = &result.business_address {
                    println!("  address:  {address}");
                }
                println!("  transcript:");
                for line in &result.log_lines {
                    println!("    {line}");
                }
            }
            Err(e) => println!("  {e}"),
        }
    } else {
        println!("\n(pass a full VAT identifier, e.g. DE123456789, to query the registry)");
    }
}
