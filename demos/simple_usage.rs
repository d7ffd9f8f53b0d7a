/// drugdb walkthrough
///
/// Loads a tab-separated products file, then:
/// - queries by application number and by chained filters
/// - rejects a duplicate insert
/// - deletes and re-inserts a record
/// - rejects the delete of a record that was never stored
///
/// Usage: cargo run --example simple_usage -- [path/to/Products.txt]

use drugdb::core::config::Config;
use drugdb::core::database::DrugDB;
use drugdb::core::types::Drug;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SAMPLE: &str = "ApplNo\tProductNo\tForm\tStrength\tReferenceDrug\tDrugName\tActiveIngredient\tReferenceStandard\n\
000004\t004\tSOLUTION/DROPS;OPHTHALMIC\t1%\t0\tPAREDRINE\tHYDROXYAMPHETAMINE HYDROBROMIDE\t0\n\
017376\t001\tTABLET;ORAL\t400MG;80MG\t1\tBACTRIM\tSULFAMETHOXAZOLE; TRIMETHOPRIM\t0\n\
020812\t001\tSUSPENSION;ORAL\t100MG/5ML\t1\tCHILDREN'S ADVIL\tIBUPROFEN\t0\n\
020812\t002\tSUSPENSION/DROPS;ORAL\t50MG/1.25ML\t1\tINFANT'S ADVIL\tIBUPROFEN\t1\n\
020955\t001\tINJECTABLE;INJECTION\t62.5MG IRON/5ML\t1\tFERRLECIT\tSODIUM FERRIC GLUCONATE COMPLEX\t1\n";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║        drugdb - Record Store Walkthrough      ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // Step 1: Load (a scratch copy of the sample unless a path is given)
    let scratch = TempDir::new()?;
    let source = match env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let path = scratch.path().join("Products.txt");
            fs::write(&path, SAMPLE)?;
            path
        }
    };
    let db = DrugDB::open(Config::for_source(&source).quiet())?;
    println!("Step 1: Loaded {} records from {}\n", db.len(), source.display());

    // Step 2: QUERY
    println!("Step 2: QUERY");
    let advils = db.query("appl_no", 20812)?.results();
    println!("  appl_no = 20812: {} records", advils.len());
    let bactrim = db
        .query("active_ingredients", "TRIMETHOPRIM")?
        .filter("appl_no", 17376)?
        .results();
    println!("  TRIMETHOPRIM AND appl_no = 17376: {} records\n", bactrim.len());

    // Step 3: INSERT with a key already in use
    println!("Step 3: INSERT duplicate");
    let infants_advil = Drug::new(20812, 2, "SUSPENSION/DROPS;ORAL", "50MG/1.25ML", 1, "INFANT'S ADVIL", "IBUPROFEN", Some(1));
    println!("  inserted: {}\n", db.insert(infants_advil.clone())?);

    // Step 4: DELETE then re-INSERT
    println!("Step 4: DELETE and re-INSERT");
    for drug in db.query("drug_name", "INFANT'S ADVIL")?.results() {
        println!("  deleted {:?}: {}", drug.drug_name, db.delete(&drug)?);
    }
    println!("  appl_no = 20812 now: {} records", db.query("appl_no", 20812)?.results().len());
    println!("  inserted: {}", db.insert(infants_advil)?);
    println!("  appl_no = 20812 now: {} records\n", db.query("appl_no", 20812)?.results().len());

    // Step 5: DELETE a record that was never stored
    println!("Step 5: DELETE absent record");
    let test_drug = Drug::new(1111, 1, "form", "strength", 1, "test drug", "active_ingredients", Some(1));
    println!("  deleted: {}\n", db.delete(&test_drug)?);

    // Step 6: Stats
    let stats = db.stats()?;
    println!("Step 6: STATS");
    println!("  records: {}", stats.record_count);
    println!("  inserts: {} (rejected {})", stats.inserts, stats.rejected_inserts);
    println!("  deletes: {} (rejected {})", stats.deletes, stats.rejected_deletes);
    println!("  queries: {}", stats.queries);

    Ok(())
}
