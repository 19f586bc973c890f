use proptest::prelude::*;
use seqsketch_core::kmer::{
    self, canonical, complement, decode, encode, encode_from_adjacent, mask, reverse,
    reverse_complement, Adjacency,
};
use seqsketch_core::nthash::{nthash, NtHashes};
use seqsketch_core::sequence;
use seqsketch_core::{KmerCode, KmerIterator};

fn acgt(min: usize, max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"ACGT".to_vec()), min..=max)
}

fn kmer_and_code() -> impl Strategy<Value = (u64, usize)> {
    (1usize..=32).prop_flat_map(|k| (0..=mask(k), Just(k)))
}

proptest! {
    #[test]
    fn decode_then_encode_is_identity((code, k) in kmer_and_code()) {
        let bases = decode(code, k).unwrap();
        prop_assert_eq!(bases.len(), k);
        prop_assert_eq!(encode(&bases).unwrap(), code);
    }

    #[test]
    fn encode_then_decode_is_identity(bases in acgt(1, 32)) {
        let code = encode(&bases).unwrap();
        prop_assert_eq!(decode(code, bases.len()).unwrap(), bases);
    }

    #[test]
    fn lowercase_encodes_like_uppercase(bases in acgt(1, 32)) {
        let lower = bases.to_ascii_lowercase();
        prop_assert_eq!(encode(&lower).unwrap(), encode(&bases).unwrap());
    }

    #[test]
    fn transforms_are_involutions((code, k) in kmer_and_code()) {
        prop_assert_eq!(reverse(reverse(code, k).unwrap(), k).unwrap(), code);
        prop_assert_eq!(complement(complement(code, k).unwrap(), k).unwrap(), code);
        let rc = reverse_complement(code, k).unwrap();
        prop_assert_eq!(reverse_complement(rc, k).unwrap(), code);
        prop_assert_eq!(complement(reverse(code, k).unwrap(), k).unwrap(), rc);
    }

    #[test]
    fn transforms_match_byte_level(bases in acgt(1, 32)) {
        let k = bases.len();
        let code = encode(&bases).unwrap();

        let reversed: Vec<u8> = bases.iter().rev().copied().collect();
        prop_assert_eq!(reverse(code, k).unwrap(), encode(&reversed).unwrap());

        let rc = sequence::reverse_complement(&bases);
        prop_assert_eq!(reverse_complement(code, k).unwrap(), encode(&rc).unwrap());
    }

    #[test]
    fn canonical_is_strand_invariant((code, k) in kmer_and_code()) {
        let rc = reverse_complement(code, k).unwrap();
        let c = canonical(code, k).unwrap();
        prop_assert_eq!(c, canonical(rc, k).unwrap());
        prop_assert_eq!(c, code.min(rc));
        prop_assert!(KmerCode::new(c, k).unwrap().is_canonical());
    }

    #[test]
    fn adjacent_encoding_agrees_with_direct(seq in acgt(2, 33)) {
        let k = seq.len() - 1;
        let first = &seq[..k];
        let second = &seq[1..];
        let first_code = encode(first).unwrap();
        let second_code = encode(second).unwrap();

        prop_assert_eq!(
            encode_from_adjacent(second, first, first_code, Adjacency::Former).unwrap(),
            second_code
        );
        prop_assert_eq!(
            encode_from_adjacent(first, second, second_code, Adjacency::Latter).unwrap(),
            first_code
        );
    }

    #[test]
    fn kmer_iterator_matches_direct_encoding(seq in acgt(1, 200), k in 1usize..=32) {
        prop_assume!(seq.len() >= k);
        let hits: Vec<_> = KmerIterator::new(&seq, k, false, false)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(hits.len(), seq.len() - k + 1);
        for hit in hits {
            prop_assert_eq!(hit.kmer.code(), encode(&seq[hit.index..hit.index + k]).unwrap());
        }
    }

    #[test]
    fn rolling_nthash_matches_direct(seq in acgt(1, 200), k in 1usize..=40, canonical in any::<bool>()) {
        prop_assume!(seq.len() >= k);
        let rolled: Vec<u64> = NtHashes::new(&seq[..], k, canonical).unwrap().collect();
        prop_assert_eq!(rolled.len(), seq.len() - k + 1);
        for (i, value) in rolled.into_iter().enumerate() {
            prop_assert_eq!(Some(value), nthash(&seq[i..i + k], canonical));
        }
    }

    #[test]
    fn canonical_nthash_is_strand_invariant(bases in acgt(1, 64)) {
        let rc = sequence::reverse_complement(&bases);
        prop_assert_eq!(nthash(&bases, true), nthash(&rc, true));
    }
}

#[test]
fn illegal_bases_are_reported() {
    for bad in [b"ACUG".as_slice(), b"AC-G", b"AC G", b"AC*G"] {
        match encode(bad) {
            Err(kmer::KmerError::IllegalBase { base, position, .. }) => {
                assert_eq!(base, bad[2]);
                assert_eq!(position, 2);
            }
            other => panic!("expected IllegalBase for {:?}, got {:?}", bad, other),
        }
    }
}
