// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod common;

use common::*;
use rayon::prelude::*;
use std::thread;
use yard_alloc_engine::prelude::*;
use yard_alloc_model::prelude::*;

#[test]
fn test_contested_cell_has_exactly_one_winner() {
    let e = engine();
    let results: Vec<_> = (0..32)
        .into_par_iter()
        .map(|i| e.place(&place_req(&format!("C{i:03}"), 5, None, 2, 1)))
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(err.kind(), ErrorKind::CellOccupied);
    }
    assert_consistent(e.store());
}

#[test]
fn test_overlapping_pairs_have_one_winner() {
    let e = engine();
    // Anchors 3, 4 and 5 all overlap a pair anchored at 4.
    let results: Vec<_> = [3u32, 4, 5, 4, 3, 5]
        .par_iter()
        .enumerate()
        .map(|(i, &slot)| e.place(&place_req(&format!("P{i}"), slot, Some(slot + 1), 1, 1)))
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert!((1..=2).contains(&winners), "{winners} winners");
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(err.kind(), ErrorKind::CellOccupied);
    }
    assert_consistent(e.store());
}

#[test]
fn test_same_container_is_placed_once() {
    let e = engine();
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (1..=10)
            .map(|slot| {
                let e = &e;
                scope.spawn(move || e.place(&place_req("DUP", slot, None, 1, 1)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(err.kind(), ErrorKind::AlreadyPlaced);
    }
    assert_eq!(e.store().active_positions().unwrap().len(), 1);
}

#[test]
fn test_concurrent_pickup_releases_once() {
    let e = engine();
    e.place(&place_req("GONE", 1, Some(2), 1, 1)).unwrap();

    let results: Vec<_> = thread::scope(|scope| {
        let a = scope.spawn(|| e.pickup(&pickup_req("GONE")));
        let b = scope.spawn(|| e.pickup(&pickup_req("GONE")));
        vec![a.join().unwrap(), b.join().unwrap()]
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let err = results.into_iter().find_map(Result::err).unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(e.store().history(&ContainerNumber::from("GONE")).unwrap().len(), 1);
}

#[test]
fn test_parallel_suggest_and_place_fills_block_without_overlap() {
    let e = engine();
    // Racing clients may pick the same suggestion; losers simply retry.
    let placed: usize = (0..60)
        .into_par_iter()
        .map(|i| {
            let container = format!("F{i:03}");
            for _ in 0..200 {
                let s = match e.suggest(&suggest_req(&container, gp20())) {
                    Ok(s) => s,
                    Err(err) => {
                        assert_eq!(err.kind(), ErrorKind::NoFreeCell);
                        return 0;
                    }
                };
                let req = PlacementRequest::from_suggestion(ContainerNumber::from(container.as_str()), &s);
                match e.place(&req) {
                    Ok(_) => return 1,
                    Err(err) => assert_eq!(err.kind(), ErrorKind::CellOccupied),
                }
            }
            0
        })
        .sum();

    assert_eq!(placed, 60);
    assert_consistent(e.store());
    assert_eq!(
        e.suggest(&suggest_req("ONE-MORE", gp20())).unwrap_err().kind(),
        ErrorKind::NoFreeCell
    );
}
