//! Example program catalog.

use serde::{Deserialize, Serialize};

/// A named example program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Display name, unique within a catalog.
    pub name: String,
    /// Program text.
    pub code: String,
}

impl Example {
    /// Create an example.
    pub fn new<N: Into<String>, C: Into<String>>(name: N, code: C) -> Self {
        Example {
            name: name.into(),
            code: code.into(),
        }
    }
}

const HELLO_WORLD: &str = r#"// Your first Lox program!
print "Hello, world!";
"#;

const FIBONACCI: &str = r#"fun fib(n) {
  if (n <= 1) return n;
  return fib(n - 2) + fib(n - 1);
}

for (var i = 0; i < 20; i = i + 1) {
  print fib(i);
}
"#;

const CLOSURES: &str = r#"fun makeCounter() {
  var i = 0;
  fun count() {
    i = i + 1;
    print i;
  }

  return count;
}

var counter = makeCounter();
counter(); // "1".
counter(); // "2".
"#;

const CLASSES: &str = r#"class Breakfast {
  init(meat, bread) {
    this.meat = meat;
    this.bread = bread;
  }

  serve(who) {
    print "Enjoy your " + this.meat + " and " +
        this.bread + ", " + who + ".";
  }
}

var baconAndToast = Breakfast("bacon", "toast");
baconAndToast.serve("Dear Reader");
"#;

const INHERITANCE: &str = r#"class Doughnut {
  cook() {
    print "Fry until golden brown.";
  }
}

class BostonCream < Doughnut {
  cook() {
    super.cook();
    print "Pipe full of custard and coat with chocolate.";
  }
}

BostonCream().cook();
"#;

const RUNTIME_ERROR: &str = r#"var greeting = "hi";
print greeting;
print missing;
print "never reached";
"#;

/// Built-in examples, in display order.
pub fn builtin_examples() -> Vec<Example> {
    vec![
        Example::new("Hello World", HELLO_WORLD),
        Example::new("Fibonacci", FIBONACCI),
        Example::new("Closures", CLOSURES),
        Example::new("Classes", CLASSES),
        Example::new("Inheritance", INHERITANCE),
        Example::new("Runtime Error", RUNTIME_ERROR),
    ]
}

/// Ordered list of example programs. The first entry is the default
/// initial source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleCatalog {
    entries: Vec<Example>,
}

impl ExampleCatalog {
    /// Catalog of the built-in examples.
    pub fn builtin() -> Self {
        ExampleCatalog {
            entries: builtin_examples(),
        }
    }

    /// Catalog with exactly `entries`, duplicates resolved by [`add`](Self::add).
    pub fn from_entries(entries: impl IntoIterator<Item = Example>) -> Self {
        let mut catalog = ExampleCatalog {
            entries: Vec::new(),
        };
        catalog.extend(entries);
        catalog
    }

    /// Add an example.
    ///
    /// An example whose name is already present replaces the existing entry
    /// in place; otherwise it goes to the end.
    pub fn add(&mut self, example: Example) {
        match self.entries.iter_mut().find(|e| e.name == example.name) {
            Some(existing) => {
                log::debug!("[loxpad catalog] replacing example '{}'", example.name);
                *existing = example;
            }
            None => self.entries.push(example),
        }
    }

    /// Add several examples, in order.
    pub fn extend(&mut self, examples: impl IntoIterator<Item = Example>) {
        for example in examples {
            self.add(example);
        }
    }

    /// Default entry: the first one.
    pub fn default_entry(&self) -> Option<&Example> {
        self.entries.first()
    }

    /// Look up an example by exact name.
    pub fn get(&self, name: &str) -> Option<&Example> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// All entries, in order.
    pub fn entries(&self) -> &[Example] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExampleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
