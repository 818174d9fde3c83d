use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn vinta_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("vinta");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let dataset_dir = root.join("dataset");
    fs::create_dir_all(&dataset_dir).unwrap();

    // Two Nike rows (the reference scenario), one Adidas row, one row with
    // a broken price, and one exact duplicate that dedup must drop.
    let csv = "\
ID,Photo,Title,Brand,Price,URL,Currency,Item_Date,Categories,Colors,Materials,Styles
1,a.jpg,red shoes,Nike,50,http://x/1,EUR,2024-01-10,Shoes,Red,Leather,Casual
2,b.jpg,blue shoes,Nike,70,http://x/2,EUR,2024-01-20,Shoes,Blue,Leather,Casual
3,c.jpg,green jacket,Adidas,40,http://x/3,EUR,2024-02-05,Jackets,Green,Wool,Sport
4,d.jpg,grey hoodie,Nike,n/a,http://x/4,EUR,2024-01-25,Hoodies,Grey,Cotton,Casual
1,a.jpg,red shoes,Nike,50,http://x/1,EUR,2024-01-10,Shoes,Red,Leather,Casual
";
    fs::write(dataset_dir.join("listings.csv"), csv).unwrap();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let config_content = format!(
        r#"[dataset]
dir = "{}/dataset"

[brands]
min_count = 2

[similarity]
threshold = 0.1
"#,
        root.display()
    );

    let config_path = config_dir.join("vinta.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_vinta(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = vinta_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run vinta binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_brands_applies_min_count() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_vinta(&config, &["brands"]);
    assert!(ok, "brands failed: {}", stderr);

    // Nike has 3 listings (dedup removed the 4th); Adidas has 1 and is
    // filtered out by min_count = 2
    assert!(stdout.contains("\"brand\": \"Nike\""), "stdout: {}", stdout);
    assert!(stdout.contains("\"count\": 3"), "stdout: {}", stdout);
    assert!(!stdout.contains("Adidas"), "stdout: {}", stdout);
}

#[test]
fn test_monthly_count_scenario() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_vinta(&config, &["count", "nike", "monthly"]);
    assert!(ok, "count failed: {}", stderr);

    // All three Nike rows fall in January; the bucket label is month end
    assert!(stdout.contains("\"date\": \"2024-01-31\""), "stdout: {}", stdout);
    assert!(stdout.contains("\"count\": 3"), "stdout: {}", stdout);
}

#[test]
fn test_monthly_pricing_scenario() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_vinta(&config, &["pricing", "Nike", "monthly"]);
    assert!(ok, "pricing failed: {}", stderr);

    // Average over the two priced rows only; the unpriced hoodie is skipped
    assert!(stdout.contains("\"average\": 60.0"), "stdout: {}", stdout);
    assert!(stdout.contains("\"min\": 50.0"), "stdout: {}", stdout);
    assert!(stdout.contains("\"max\": 70.0"), "stdout: {}", stdout);
    assert!(stdout.contains("\"count\": 2"), "stdout: {}", stdout);
}

#[test]
fn test_pricing_respects_date_bounds() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, ok) = run_vinta(
        &config,
        &["pricing", "Nike", "monthly", "--start", "2024-01-15"],
    );
    assert!(ok);

    // Only the blue shoes (Jan 20) remain in range
    assert!(stdout.contains("\"count\": 1"), "stdout: {}", stdout);
    assert!(stdout.contains("\"average\": 70.0"), "stdout: {}", stdout);
}

#[test]
fn test_invalid_date_bound_is_rejected() {
    let (_tmp, config) = setup_test_env();
    let (_, stderr, ok) = run_vinta(&config, &["count", "Nike", "monthly", "--start", "01-10-2024"]);
    assert!(!ok);
    assert!(stderr.contains("YYYY-MM-DD"), "stderr: {}", stderr);
}

#[test]
fn test_unknown_brand_prints_no_results() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, ok) = run_vinta(&config, &["count", "Puma", "monthly"]);
    assert!(ok);
    assert!(stdout.contains("No results."), "stdout: {}", stdout);
}

#[test]
fn test_keywords_rank_brand_vocabulary() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_vinta(&config, &["keywords", "Nike", "--limit", "5"]);
    assert!(ok, "keywords failed: {}", stderr);

    // "shoes" appears in two titles and two category tags
    assert!(stdout.contains("\"word\": \"shoes\""), "stdout: {}", stdout);
    assert!(stdout.contains("\"count\": 4"), "stdout: {}", stdout);
    // Adidas vocabulary must not leak in
    assert!(!stdout.contains("jacket"), "stdout: {}", stdout);
}

#[test]
fn test_keyword_pricing_conjunction_hit() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_vinta(&config, &["keyword-pricing", "Nike", "shoes"]);
    assert!(ok, "keyword-pricing failed: {}", stderr);

    assert!(stdout.contains("\"average\": 60.0"), "stdout: {}", stdout);
    assert!(stdout.contains("\"count\": 2"), "stdout: {}", stdout);
}

#[test]
fn test_keyword_pricing_miss_prints_no_results() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, ok) = run_vinta(&config, &["keyword-pricing", "Nike", "boots"]);
    assert!(ok);
    assert!(stdout.contains("No results."), "stdout: {}", stdout);
}

#[test]
fn test_similar_reports_price_analysis() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_vinta(&config, &["similar", "red,shoes"]);
    assert!(ok, "similar failed: {}", stderr);

    // Small corpus: the fallback returns every indexed (priced) listing
    assert!(stdout.contains("\"count\": 3"), "stdout: {}", stdout);
    assert!(stdout.contains("\"similar_items\""), "stdout: {}", stdout);
    assert!(stdout.contains("red shoes"), "stdout: {}", stdout);
    assert!(stdout.contains("\"price_ranges\""), "stdout: {}", stdout);
}

#[test]
fn test_stats_reports_corpus_overview() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_vinta(&config, &["stats"]);
    assert!(ok, "stats failed: {}", stderr);

    assert!(stdout.contains("Listings:    4"), "stdout: {}", stdout);
    assert!(stdout.contains("Nike"), "stdout: {}", stdout);
}
