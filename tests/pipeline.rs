use std::fs;
use std::path::Path;

use netclust::pipeline::{AnalysisOptions, run_device_analysis};
use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;

const FEATURES: usize = 10;

fn write_capture(path: &Path, rows: usize, offset: f64, rng: &mut StdRng) {
    let jitter = Uniform::new(-1.0, 1.0);
    let header: Vec<String> = (0..FEATURES).map(|c| format!("f{}", c)).collect();
    let mut out = header.join(",");
    out.push('\n');
    for _ in 0..rows {
        let row: Vec<String> = (0..FEATURES)
            .map(|c| format!("{:.6}", offset + c as f64 * 0.1 + jitter.sample(rng)))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    fs::write(path, out).unwrap();
}

/// benign blob around 0, scan blob around 8, identical generation for a
/// given seed.
fn write_device_dir(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    write_capture(&dir.join("benign_traffic.csv"), 100, 0.0, &mut rng);
    write_capture(&dir.join("scan.csv"), 50, 8.0, &mut rng);
}

#[test]
fn end_to_end_device_analysis() {
    let root = tempfile::tempdir().unwrap();
    let device_dir = root.path().join("TestCam");
    write_device_dir(&device_dir);

    let options = AnalysisOptions {
        variance_target: 0.9,
        save_combined: true,
        save_reduced: true,
        seed: 11,
    };
    let report = run_device_analysis(&device_dir, &options).unwrap();

    assert_eq!(report.device, "TestCam");
    assert!(report.n_components >= 1 && report.n_components <= FEATURES);

    // score table covers exactly k = 2..=11
    assert_eq!(report.scores.entries.len(), 10);
    let ks: Vec<usize> = report.scores.entries.iter().map(|&(k, _)| k).collect();
    assert_eq!(ks, (2..=11).collect::<Vec<_>>());
    assert!(report.best_k >= 2 && report.best_k <= 11);
    let lowest = report
        .scores
        .entries
        .iter()
        .map(|&(_, score)| score)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(report.best_score, lowest);

    // every assembled row lands in exactly one cluster
    assert_eq!(report.compositions.len(), report.best_k);
    let total: usize = report.compositions.iter().map(|c| c.observations).sum();
    assert_eq!(total, 150);

    // proportions sum to 1 within each populated cluster
    for composition in &report.compositions {
        if composition.observations == 0 {
            continue;
        }
        let sum: f64 = composition.entries.iter().map(|e| e.proportion).sum();
        assert!((sum - 1.0).abs() < 1e-3, "cluster {}: {}", composition.cluster, sum);
    }

    // spreads cover exactly the two traffic types
    let spread_labels: Vec<&str> = report.spreads.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(spread_labels, vec!["benign_traffic", "scan"]);
    let benign_total: usize = report.spreads[0].per_cluster.iter().map(|&(_, n)| n).sum();
    let scan_total: usize = report.spreads[1].per_cluster.iter().map(|&(_, n)| n).sum();
    assert_eq!(benign_total, 100);
    assert_eq!(scan_total, 50);

    // artifacts on disk
    assert!(device_dir.join("TestCam.csv").is_file());
    assert!(device_dir.join("TestCam_pca.csv").is_file());
    for cluster in 0..report.best_k {
        assert!(
            device_dir.join(format!("cluster_{}.png", cluster)).is_file(),
            "missing plot for cluster {}",
            cluster
        );
    }

    let text = fs::read_to_string(device_dir.join("output_file.txt")).unwrap();
    assert!(text.starts_with("TestCam\n"));
    assert!(text.contains("Number of principal components used to explain 0.9 of the variation"));
    assert!(text.contains("Davies-Bouldin indices"));
    assert!(text.contains(&format!("was obtained for K = {}", report.best_k)));
    assert!(text.contains("Number of obs in the different clusters"));
    assert!(text.contains("Distribution of the labels among the different clusters"));
    assert!(text.contains("benign_traffic {clusters:"));
    assert!(text.contains("scan {clusters:"));
}

#[test]
fn pipeline_is_deterministic_for_fixed_seed() {
    let first_root = tempfile::tempdir().unwrap();
    let second_root = tempfile::tempdir().unwrap();
    let first_dir = first_root.path().join("TestCam");
    let second_dir = second_root.path().join("TestCam");
    write_device_dir(&first_dir);
    write_device_dir(&second_dir);

    let options = AnalysisOptions {
        variance_target: 0.9,
        save_combined: false,
        save_reduced: false,
        seed: 11,
    };
    let first = run_device_analysis(&first_dir, &options).unwrap();
    let second = run_device_analysis(&second_dir, &options).unwrap();

    assert_eq!(first.scores.entries, second.scores.entries);
    assert_eq!(first.best_k, second.best_k);
    assert_eq!(first.best_score, second.best_score);
    assert_eq!(first.n_components, second.n_components);
    assert_eq!(first.compositions, second.compositions);
    assert_eq!(first.spreads, second.spreads);
}

#[test]
fn missing_benign_capture_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let device_dir = root.path().join("TestCam");
    fs::create_dir_all(&device_dir).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    write_capture(&device_dir.join("scan.csv"), 10, 0.0, &mut rng);

    let result = run_device_analysis(&device_dir, &AnalysisOptions::default());
    assert!(matches!(result, Err(netclust::Error::MissingBenign(_))));
}
