//! Integration tests for sparrow-matrix.

use sparrow_matrix::{CooMatrix, CsrMatrix, SparseMatrix, YaleMatrix};
use sparrow_types::SparrowError;

/// The 3×3 matrix with (1,1)=10, (3,1)=-5, (3,2)=2, (1,3)=3.
fn sample() -> SparseMatrix {
    let mut m = SparseMatrix::new(3, 3).unwrap();
    m.assign(1, 1, 10.0).unwrap();
    m.assign(3, 1, -5.0).unwrap();
    m.assign(3, 2, 2.0).unwrap();
    m.assign(1, 3, 3.0).unwrap();
    m
}

/// A 5×4 matrix with a few scattered entries, used for rectangular checks.
fn rectangular() -> SparseMatrix {
    SparseMatrix::from_elements(
        5,
        4,
        [
            (1, 2, 1.5),
            (2, 1, -2.0),
            (2, 4, 4.0),
            (4, 3, 7.0),
            (5, 1, 0.25),
            (5, 4, -1.0),
        ],
    )
    .unwrap()
}

// ─── Store Tests ──────────────────────────────────────────────

#[test]
fn new_rejects_zero_dimensions() {
    assert!(matches!(
        SparseMatrix::new(0, 3),
        Err(SparrowError::DimensionMismatch(_))
    ));
    assert!(SparseMatrix::new(3, 0).is_err());
}

#[test]
fn assign_then_get() {
    let mut m = SparseMatrix::new(4, 4).unwrap();
    m.assign(2, 3, 1.25).unwrap();
    assert_eq!(m.get(2, 3).unwrap(), 1.25);
    assert_eq!(m.get(3, 2).unwrap(), 0.0);
    assert_eq!(m.number_of_elements(), 1);
}

#[test]
fn assign_accumulates() {
    let mut m = SparseMatrix::new(2, 2).unwrap();
    m.assign(1, 2, 1.5).unwrap();
    m.assign(1, 2, 2.0).unwrap();
    assert_eq!(m.get(1, 2).unwrap(), 3.5);
    assert_eq!(m.number_of_elements(), 1);
}

#[test]
fn assign_cancelling_keeps_entry() {
    let mut m = SparseMatrix::new(2, 2).unwrap();
    m.assign(2, 1, 4.0).unwrap();
    m.assign(2, 1, -4.0).unwrap();
    assert_eq!(m.get(2, 1).unwrap(), 0.0);
    assert_eq!(m.number_of_elements(), 1);
    assert!(m.contains(2, 1));
}

#[test]
fn assign_zero_is_noop() {
    let mut m = SparseMatrix::new(2, 2).unwrap();
    m.assign(1, 1, 0.0).unwrap();
    m.assign(1, 1, -0.0).unwrap();
    m.update(2, 2, 0.0).unwrap();
    assert_eq!(m.number_of_elements(), 0);
}

#[test]
fn update_replaces() {
    let mut m = SparseMatrix::new(2, 2).unwrap();
    m.update(1, 1, 3.0).unwrap();
    m.update(1, 1, -7.0).unwrap();
    assert_eq!(m.get(1, 1).unwrap(), -7.0);
    assert_eq!(m.number_of_elements(), 1);
}

#[test]
fn update_zero_keeps_existing_value() {
    let mut m = SparseMatrix::new(2, 2).unwrap();
    m.update(1, 2, 3.0).unwrap();
    m.update(1, 2, 0.0).unwrap();
    assert_eq!(m.get(1, 2).unwrap(), 3.0);
}

#[test]
fn out_of_range_indices_rejected() {
    let mut m = SparseMatrix::new(3, 2).unwrap();
    assert!(matches!(
        m.assign(0, 1, 1.0),
        Err(SparrowError::InvalidIndex { row: 0, col: 1, .. })
    ));
    assert!(m.assign(4, 1, 1.0).is_err());
    assert!(m.update(1, 3, 1.0).is_err());
    assert!(m.get(1, 3).is_err());
    assert_eq!(m.number_of_elements(), 0);
}

#[test]
fn remove_reports_presence() {
    let mut m = sample();
    assert!(m.remove(3, 2));
    assert!(!m.remove(3, 2));
    assert!(!m.remove(2, 2));
    assert_eq!(m.number_of_elements(), 3);
}

#[test]
fn clear_keeps_dimensions() {
    let mut m = sample();
    m.clear();
    assert_eq!(m.number_of_elements(), 0);
    assert_eq!(m.number_of_rows(), 3);
    assert_eq!(m.number_of_columns(), 3);
}

#[test]
fn iteration_is_sorted() {
    let m = rectangular();
    let keys: Vec<(usize, usize)> = m.iter().map(|e| (e.row, e.col)).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(keys.len(), 6);
}

// ─── Format Tests ─────────────────────────────────────────────

#[test]
fn coo_of_sample() {
    let m = sample();
    let coo = m.to_coo();
    assert_eq!(m.number_of_elements(), 4);
    assert_eq!(coo.row, vec![1, 1, 3, 3]);
    assert_eq!(coo.col, vec![1, 3, 1, 2]);
    assert_eq!(coo.value, vec![10.0, 3.0, -5.0, 2.0]);
}

#[test]
fn csr_of_sample() {
    let csr = sample().to_csr();
    assert_eq!(csr.row_ptr, vec![0, 2, 2, 4]);
    assert_eq!(csr.col, vec![1, 3, 1, 2]);
    assert_eq!(csr.value, vec![10.0, 3.0, -5.0, 2.0]);
    assert_eq!(csr.row_len(2), Some(0));
}

#[test]
fn csr_leading_empty_rows() {
    let m = SparseMatrix::from_elements(4, 2, [(3, 1, 1.0), (3, 2, 2.0)]).unwrap();
    let csr = m.to_csr();
    assert_eq!(csr.row_ptr, vec![0, 0, 0, 2, 2]);
}

#[test]
fn csr_of_empty_matrix() {
    let m = SparseMatrix::new(3, 3).unwrap();
    let csr = m.to_csr();
    assert_eq!(csr.row_ptr, vec![0, 0, 0, 0]);
    assert_eq!(csr.nnz(), 0);
}

#[test]
fn csr_row_counts_match_store() {
    let m = rectangular();
    let csr = m.to_csr();
    for r in 1..=m.number_of_rows() {
        let line = m.row(r).unwrap();
        assert_eq!(csr.row_len(r), Some(line.len()), "row {r}");
        let slice = &csr.col[csr.row_ptr[r - 1]..csr.row_ptr[r]];
        assert!(slice.windows(2).all(|w| w[0] <= w[1]));
    }
    assert_eq!(*csr.row_ptr.last().unwrap(), m.number_of_elements());
}

#[test]
fn csr_row_len_out_of_range() {
    let csr = sample().to_csr();
    assert_eq!(csr.row_len(0), None);
    assert_eq!(csr.row_len(4), None);

    let malformed = CsrMatrix {
        rows: 2,
        cols: 2,
        row_ptr: vec![0, 2, 1],
        col: vec![1, 2],
        value: vec![1.0, 2.0],
    };
    assert_eq!(malformed.row_len(2), None);
}

#[test]
fn yale_of_sample() {
    let yale = sample().to_yale();
    assert_eq!(yale.ija, vec![4, 5, 5, 7, 3, 1, 2]);
    assert_eq!(yale.val, vec![10.0, 0.0, 0.0, 0.0, 3.0, -5.0, 2.0]);
    assert_eq!(yale.off_diagonal_count(), 3);
}

#[test]
fn yale_trailing_rows_are_well_formed() {
    // Off-diagonal entries only in the first row.
    let m = SparseMatrix::from_elements(4, 4, [(1, 2, 1.0), (3, 3, 9.0)]).unwrap();
    let yale = m.to_yale();
    assert_eq!(yale.ija, vec![5, 6, 6, 6, 6, 2]);
    assert_eq!(yale.val[2], 9.0);
}

#[test]
fn yale_off_diagonal_count_on_truncated_arrays() {
    let truncated = YaleMatrix {
        rows: 3,
        cols: 3,
        ija: vec![4, 4],
        val: vec![1.0, 0.0],
    };
    assert_eq!(truncated.off_diagonal_count(), 0);
}

#[test]
fn dense_of_sample() {
    let d = sample().to_dense();
    assert_eq!(d.rows, 3);
    assert_eq!(d.row(0), &[10.0, 0.0, 3.0]);
    assert_eq!(d.row(1), &[0.0, 0.0, 0.0]);
    assert_eq!(d.row(2), &[-5.0, 2.0, 0.0]);
}

#[test]
fn coo_rebuild_matches() {
    let m = rectangular();
    let coo = m.to_coo();
    let mut rebuilt = SparseMatrix::new(coo.rows, coo.cols).unwrap();
    for i in 0..coo.nnz() {
        rebuilt.assign(coo.row[i], coo.col[i], coo.value[i]).unwrap();
    }
    for r in 1..=m.number_of_rows() {
        for c in 1..=m.number_of_columns() {
            assert_eq!(rebuilt.get(r, c).unwrap(), m.get(r, c).unwrap());
        }
    }
}

#[test]
fn inverse_converters_reproduce_store() {
    let m = sample();
    assert_eq!(SparseMatrix::from_coo(&m.to_coo()).unwrap(), m);
    assert_eq!(SparseMatrix::from_csr(&m.to_csr()).unwrap(), m);
    assert_eq!(SparseMatrix::from_yale(&m.to_yale()).unwrap(), m);
    assert_eq!(SparseMatrix::from_dense(&m.to_dense()).unwrap(), m);
}

#[test]
fn malformed_snapshots_rejected() {
    let bad_coo = CooMatrix {
        rows: 2,
        cols: 2,
        row: vec![1],
        col: vec![1, 2],
        value: vec![1.0],
    };
    assert!(SparseMatrix::from_coo(&bad_coo).is_err());

    let bad_csr = CsrMatrix {
        rows: 2,
        cols: 2,
        row_ptr: vec![0, 1],
        col: vec![1],
        value: vec![1.0],
    };
    assert!(SparseMatrix::from_csr(&bad_csr).is_err());

    let bad_yale = YaleMatrix {
        rows: 2,
        cols: 2,
        ija: vec![2, 3, 4],
        val: vec![1.0, 1.0, 0.0],
    };
    assert!(SparseMatrix::from_yale(&bad_yale).is_err());
}

#[test]
fn snapshots_are_independent() {
    let mut m = sample();
    let coo = m.to_coo();
    let copy = m.copy();
    m.assign(2, 2, 1.0).unwrap();
    assert_eq!(coo.nnz(), 4);
    assert_eq!(copy.number_of_elements(), 4);
    assert_eq!(m.number_of_elements(), 5);
}

#[test]
fn transpose_swaps_entries() {
    let m = rectangular();
    let t = m.transpose();
    assert_eq!(t.number_of_rows(), 4);
    assert_eq!(t.number_of_columns(), 5);
    for r in 1..=5 {
        for c in 1..=4 {
            assert_eq!(t.get(c, r).unwrap(), m.get(r, c).unwrap());
        }
    }
}

#[test]
fn row_and_column_lines() {
    let m = sample();
    let row = m.row(3).unwrap();
    assert_eq!(row.index, vec![1, 2]);
    assert_eq!(row.value, vec![-5.0, 2.0]);

    let col = m.column(1).unwrap();
    assert_eq!(col.index, vec![1, 3]);
    assert_eq!(col.value, vec![10.0, -5.0]);

    assert!(m.row(2).unwrap().is_empty());
    assert!(m.row(4).is_err());
    assert!(m.column(0).is_err());
}

#[test]
fn coo_serializes() {
    let coo = sample().to_coo();
    let json = serde_json::to_string(&coo).unwrap();
    let recovered: CooMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, coo);
}

// ─── Algebra Tests ────────────────────────────────────────────

#[test]
fn scale_does_not_prune() {
    let mut m = sample();
    m.scale(0.0);
    assert_eq!(m.number_of_elements(), 4);
    assert_eq!(m.get(1, 1).unwrap(), 0.0);

    let mut m = sample();
    m.scale(-2.0);
    assert_eq!(m.get(3, 1).unwrap(), 10.0);
}

#[test]
fn diagonal_extraction() {
    assert_eq!(sample().diagonal(), vec![10.0, 0.0, 0.0]);
    let d = rectangular().diagonal();
    assert_eq!(d.len(), 5);
    assert_eq!(d[4], 0.0);
}

#[test]
fn add_to_diagonal_accumulates() {
    let mut m = sample();
    m.add_to_diagonal(1.0);
    assert_eq!(m.diagonal(), vec![11.0, 1.0, 1.0]);
    assert_eq!(m.number_of_elements(), 6);

    let mut r = rectangular();
    r.add_to_diagonal(2.0);
    assert_eq!(r.get(4, 4).unwrap(), 2.0);
}

#[test]
fn mat_vec_matches_definition() {
    let m = rectangular();
    let x = [1.0, -2.0, 0.5, 3.0];
    let y = m.mat_vec(&x).unwrap();
    assert_eq!(y.len(), 5);
    for r in 0..5 {
        let expected: f64 = (0..4).map(|c| m.get(r + 1, c + 1).unwrap() * x[c]).sum();
        let tol = 1e-9 * expected.abs().max(1.0);
        assert!((y[r] - expected).abs() < tol, "y[{r}] = {}, expected {expected}", y[r]);
    }
}

#[test]
fn transpose_mat_vec_matches_transpose() {
    let m = rectangular();
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let direct = m.transpose_mat_vec(&x).unwrap();
    let via_transpose = m.transpose().mat_vec(&x).unwrap();
    assert_eq!(direct, via_transpose);
}

#[test]
fn mat_vec_length_checked() {
    let m = rectangular();
    assert!(matches!(
        m.mat_vec(&[1.0; 5]),
        Err(SparrowError::DimensionMismatch(_))
    ));
    assert!(m.transpose_mat_vec(&[1.0; 4]).is_err());
}

#[test]
fn transfer_matrix_divides_by_column_diagonal() {
    let m = SparseMatrix::from_elements(
        3,
        3,
        [(1, 1, 2.0), (2, 2, 4.0), (3, 3, 5.0), (1, 2, 8.0), (3, 1, 1.0)],
    )
    .unwrap();
    let t = m.transfer_matrix().unwrap();
    assert_eq!(t.number_of_elements(), 2);
    assert_eq!(t.get(1, 2).unwrap(), 2.0);
    assert_eq!(t.get(3, 1).unwrap(), 0.5);
    assert_eq!(t.get(1, 1).unwrap(), 0.0);
}

#[test]
fn transfer_matrix_zero_diagonal_fails() {
    let m = SparseMatrix::from_elements(2, 2, [(1, 1, 1.0), (1, 2, 3.0)]).unwrap();
    assert!(matches!(
        m.transfer_matrix(),
        Err(SparrowError::SingularMatrix { pivot: 1 })
    ));
}

#[test]
fn insert_submatrix_accumulates() {
    let mut target = SparseMatrix::from_elements(4, 4, [(2, 2, 1.0)]).unwrap();
    let sub = SparseMatrix::from_elements(2, 2, [(1, 1, 5.0), (2, 2, 6.0)]).unwrap();
    target.insert_submatrix(&sub, 2, 2).unwrap();
    assert_eq!(target.get(2, 2).unwrap(), 6.0);
    assert_eq!(target.get(3, 3).unwrap(), 6.0);
    assert_eq!(sub.number_of_elements(), 2);
}

#[test]
fn insert_submatrix_overflow_rejected() {
    let mut target = SparseMatrix::new(3, 3).unwrap();
    let sub = SparseMatrix::from_elements(2, 2, [(1, 1, 1.0)]).unwrap();
    assert!(matches!(
        target.insert_submatrix(&sub, 3, 1),
        Err(SparrowError::DimensionMismatch(_))
    ));
    assert!(target.insert_submatrix(&sub, 0, 1).is_err());
    assert_eq!(target.number_of_elements(), 0);
}

#[test]
fn extract_submatrix_window() {
    let m = rectangular();
    let sub = m.extract_submatrix(2, 1, 3, 4).unwrap();
    assert_eq!(sub.number_of_rows(), 3);
    assert_eq!(sub.number_of_columns(), 4);
    assert_eq!(sub.get(1, 1).unwrap(), -2.0);
    assert_eq!(sub.get(1, 4).unwrap(), 4.0);
    assert_eq!(sub.get(3, 3).unwrap(), 7.0);
    assert_eq!(sub.number_of_elements(), 3);
}

#[test]
fn extract_submatrix_bounds() {
    let m = rectangular();
    assert!(m.extract_submatrix(4, 1, 3, 1).is_err());
    assert!(m.extract_submatrix(1, 1, 0, 1).is_err());
    assert!(m.extract_submatrix(1, 5, 1, 1).is_err());
}

// ─── Reshape Tests ────────────────────────────────────────────

#[test]
fn remove_row_of_sample() {
    let mut m = sample();
    m.remove_row(2).unwrap();
    assert_eq!(m.number_of_rows(), 2);
    assert_eq!(m.number_of_columns(), 3);
    assert_eq!(m.row(1).unwrap(), sample().row(1).unwrap());
    assert_eq!(m.row(2).unwrap(), sample().row(3).unwrap());
}

#[test]
fn remove_column_shifts_left() {
    let mut m = sample();
    m.remove_column(1).unwrap();
    assert_eq!(m.number_of_columns(), 2);
    assert_eq!(m.get(1, 2).unwrap(), 3.0);
    assert_eq!(m.get(3, 1).unwrap(), 2.0);
    assert_eq!(m.number_of_elements(), 2);
}

#[test]
fn insert_row_shifts_down() {
    let mut m = sample();
    m.insert_row(2, &[1.0, 0.0, -1.0]).unwrap();
    assert_eq!(m.number_of_rows(), 4);
    assert_eq!(m.get(2, 1).unwrap(), 1.0);
    assert_eq!(m.get(2, 3).unwrap(), -1.0);
    assert_eq!(m.get(4, 1).unwrap(), -5.0);
    assert_eq!(m.number_of_elements(), 6);
}

#[test]
fn insert_row_at_end() {
    let mut m = sample();
    m.insert_row(4, &[0.0, 9.0, 0.0]).unwrap();
    assert_eq!(m.get(4, 2).unwrap(), 9.0);
    assert_eq!(m.get(3, 2).unwrap(), 2.0);
}

#[test]
fn insert_column_shifts_right() {
    let mut m = sample();
    m.insert_column(1, &[7.0, 8.0, 0.0]).unwrap();
    assert_eq!(m.number_of_columns(), 4);
    assert_eq!(m.get(1, 1).unwrap(), 7.0);
    assert_eq!(m.get(1, 2).unwrap(), 10.0);
    assert_eq!(m.get(3, 3).unwrap(), 2.0);
}

#[test]
fn failed_reshape_leaves_matrix_untouched() {
    let mut m = sample();
    assert!(m.insert_row(2, &[1.0, 2.0]).is_err());
    assert!(m.insert_row(5, &[1.0, 2.0, 3.0]).is_err());
    assert!(m.insert_column(1, &[1.0]).is_err());
    assert!(m.remove_row(4).is_err());
    assert!(m.remove_column(0).is_err());
    assert_eq!(m, sample());
}

#[test]
fn cannot_remove_last_row() {
    let mut m = SparseMatrix::from_elements(1, 2, [(1, 1, 1.0)]).unwrap();
    assert!(matches!(
        m.remove_row(1),
        Err(SparrowError::DimensionMismatch(_))
    ));
    assert_eq!(m.number_of_rows(), 1);
}
