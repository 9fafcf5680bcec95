#![no_main]

use std::collections::BTreeSet;

use libfuzzer_sys::fuzz_target;

use avlstore::StringSet;

fuzz_target!(|ops: Vec<(bool, String)>| {
    let mut set = StringSet::new();
    let mut model = BTreeSet::new();

    for (add, element) in ops {
        // Members are bounded-length identifiers; mirror the truncation in the model.
        let member = avlstore::Identifier::new(&element);
        if add {
            assert_eq!(set.add(member), model.insert(member));
        } else {
            assert_eq!(set.remove(member), model.remove(&member));
        }
        assert_eq!(set.size(), model.len());
        assert_eq!(set.contains(member), model.contains(&member));
    }
    assert_eq!(set.elements(), model.into_iter().collect::<Vec<_>>());
});
