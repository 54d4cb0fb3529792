//! Integration tests for indexed FASTA access over real files

use fastaview::io::fasta::{
    open_fastas, FastaCollection, FastaDataset, FastaIndex, FastaOptions, PermutedView,
    RecordCollection, Slice,
};
use fastaview::io::{AccessPattern, DataSource};
use fastaview::FastaError;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn test_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/synthetic/sequence")
}

fn write_fasta(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    path
}

#[test]
fn test_index_synthetic_file() {
    let index = FastaIndex::from_path(test_data_dir().join("test.fa"))
        .expect("Failed to index test.fa");

    assert_eq!(index.len(), 3);

    let chr1 = index.get(0).unwrap();
    assert_eq!(chr1.id, "chr1");
    assert_eq!(chr1.description, "chr1 first chromosome");
    assert_eq!(chr1.sequence.len(), 44); // 28 + 16 bases
    assert!(chr1.sequence.starts_with("ACGTACGTACGTACGTACGTACGTACGT"));
    assert!(chr1.sequence.ends_with("TGCATGCATGCATGCA"));

    let chr2 = index.get(1).unwrap();
    assert_eq!(chr2.id, "chr2");
    assert_eq!(chr2.description, "chr2");
    assert_eq!(chr2.sequence, "GGGGCCCCAAAATTTT");

    let chr3 = index.get(-1).unwrap();
    assert_eq!(chr3.id, "chr3");
    assert_eq!(chr3.sequence.len(), 64); // 28 + 28 + 8 bases
    assert!(chr3.sequence.ends_with("ATCGATCG"));
}

#[test]
fn test_protein_file_quirks() {
    let index = FastaIndex::from_path(test_data_dir().join("proteins.fa")).unwrap();
    assert_eq!(index.len(), 2);

    // Gap '-' and stop '*' are removed along with whitespace
    let prot1 = index.get(0).unwrap();
    assert_eq!(prot1.description, "prot1 kinase domain");
    assert_eq!(prot1.sequence, "MKVLIVLG");

    let prot2 = index.get(1).unwrap();
    assert_eq!(prot2.sequence, "MSTNPKPQRKTKRNTNRRPQ");
}

#[test]
fn test_two_file_collection() {
    let dir = TempDir::new().unwrap();
    let contents = b">seq1 desc one\nACGT\nAC\n>seq2\nggtt\n";
    let a = write_fasta(&dir, "a.fa", contents);
    let b = write_fasta(&dir, "b.fa", contents);

    let dataset = open_fastas([a.as_path(), b.as_path()], &FastaOptions::default()).unwrap();
    assert!(matches!(dataset, FastaDataset::Multi(_)));
    assert_eq!(dataset.len(), 4);

    let FastaDataset::Multi(collection) = &dataset else {
        panic!("expected a multi-file collection");
    };
    assert_eq!(collection.locate(2).unwrap(), (1, 0));
    assert_eq!(collection.locate(3).unwrap(), (1, 1));

    let third = dataset.get(2).unwrap();
    assert_eq!(third.id, "seq1");
    assert_eq!(third.sequence, "ACGTAC");

    let fourth = dataset.get(3).unwrap();
    assert_eq!(fourth.id, "seq2");
    assert_eq!(fourth.sequence, "GGTT");
}

#[test]
fn test_collection_count_is_sum_of_files() {
    let files = [test_data_dir().join("test.fa"), test_data_dir().join("proteins.fa")];

    let expected: usize = files
        .iter()
        .map(|path| FastaIndex::from_path(path).unwrap().len())
        .sum();

    let collection = FastaCollection::open(files.iter().cloned(), &FastaOptions::default()).unwrap();
    assert_eq!(collection.len(), expected);
    assert_eq!(collection.len(), 5);

    let ids: Vec<String> = collection.iter().map(|r| r.unwrap().id).collect();
    assert_eq!(ids, vec!["chr1", "chr2", "chr3", "prot1", "prot2"]);
}

#[test]
fn test_mixed_input_kinds() {
    let dir = TempDir::new().unwrap();
    let path = write_fasta(&dir, "path.fa", b">from_path\nAAAA\n");
    let handle_path = write_fasta(&dir, "handle.fa", b">from_handle\nCCCC\n");

    let inputs = vec![
        DataSource::from_path(&path),
        DataSource::from(File::open(&handle_path).unwrap()),
        DataSource::from(b">from_bytes\nGGGG\n".to_vec()),
    ];
    let options = FastaOptions::new().with_access(AccessPattern::Sequential);
    let dataset = open_fastas(inputs, &options).unwrap();

    let ids: Vec<String> = dataset
        .get_range(Slice::full())
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["from_path", "from_handle", "from_bytes"]);
}

#[test]
fn test_shuffled_batches_over_files() {
    let files = [test_data_dir().join("test.fa"), test_data_dir().join("proteins.fa")];
    let dataset = open_fastas(files.iter().cloned(), &FastaOptions::default()).unwrap();

    let batch = dataset.get_many(&[4, 0, 3, 1, 0, -3]).unwrap();
    let ids: Vec<&str> = batch.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["prot2", "chr1", "prot1", "chr2", "chr1", "chr3"]);

    for (k, &position) in [4isize, 0, 3, 1, 0, -3].iter().enumerate() {
        assert_eq!(batch[k], dataset.get(position).unwrap());
    }
}

#[test]
fn test_permuted_view_over_dataset() {
    let dataset = open_fastas([test_data_dir().join("test.fa")], &FastaOptions::default()).unwrap();

    let view = PermutedView::build(&dataset, vec![2, 0]).unwrap();
    assert_eq!(view.len(), 2);
    assert_eq!(view.get(0).unwrap().id, "chr3");
    assert_eq!(view.get(-1).unwrap().id, "chr1");

    assert!(matches!(
        PermutedView::build(&dataset, vec![0, 3]),
        Err(FastaError::IndexOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn test_records_outlive_index() {
    let dir = TempDir::new().unwrap();
    let path = write_fasta(&dir, "short.fa", b">r1\nAC\n>r2\nGT\n");

    let records = {
        let index = FastaIndex::from_path(&path).unwrap();
        index.get_many(&[1, 0]).unwrap()
    };

    // Records own their text once the index (and its map) is gone
    assert_eq!(records[0].sequence, "GT");
    assert_eq!(records[1].sequence, "AC");
}

#[test]
fn test_empty_and_non_fasta_files() {
    let dir = TempDir::new().unwrap();
    let empty = write_fasta(&dir, "empty.fa", b"");
    let text = write_fasta(&dir, "notes.txt", b"just some notes\nno records\n");

    assert!(matches!(
        FastaIndex::from_path(&empty),
        Err(FastaError::EmptySource)
    ));
    assert!(matches!(
        FastaIndex::from_path(&text),
        Err(FastaError::NotFasta { .. })
    ));
    assert!(matches!(
        open_fastas(Vec::<PathBuf>::new(), &FastaOptions::default()),
        Err(FastaError::NoInputFiles)
    ));
}

#[test]
fn test_missing_file() {
    let result = FastaIndex::from_path(test_data_dir().join("does_not_exist.fa"));
    assert!(matches!(result, Err(FastaError::Io(_))));
}

#[test]
fn test_index_is_shareable_across_threads() {
    let index = FastaIndex::from_path(test_data_dir().join("test.fa")).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let index = &index;
                scope.spawn(move || index.get((t % 3) as isize).unwrap().id)
            })
            .collect();

        let ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ids, vec!["chr1", "chr2", "chr3", "chr1"]);
    });
}
