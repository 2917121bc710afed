//! Per-file output buffer and Go import bookkeeping.

use std::collections::{BTreeMap, HashSet};

use crate::descriptor::{GoIdent, GoPackage};
use crate::naming::package_name_for;

/// Go's universe scope. An import alias spelled like one of these would
/// shadow it for the whole file, and generated code relies on `error`, `new`
/// and `nil`.
const PREDECLARED: &[&str] = &[
    "any", "append", "bool", "byte", "cap", "clear", "close", "comparable", "complex",
    "complex128", "complex64", "copy", "delete", "error", "false", "float32", "float64", "imag",
    "int", "int16", "int32", "int64", "int8", "iota", "len", "make", "max", "min", "new", "nil",
    "panic", "print", "println", "real", "recover", "rune", "string", "true", "uint", "uint16",
    "uint32", "uint64", "uint8", "uintptr",
];

/// Resolves Go identifiers to the spelling valid inside one generated file,
/// recording every package that needs importing along the way.
#[derive(Debug)]
pub struct Imports {
    own_import_path: String,
    /// Import path to the alias it was given in this file.
    aliases: BTreeMap<String, String>,
    used: HashSet<String>,
}

impl Imports {
    /// The package clause does not declare a name in file scope, so the
    /// file's own package name stays available as an alias.
    pub fn new(own_package: &GoPackage) -> Self {
        Self {
            own_import_path: own_package.import_path.clone(),
            aliases: BTreeMap::new(),
            used: PREDECLARED.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `Name` for identifiers of this file's own package, `alias.Name`
    /// otherwise.
    ///
    /// Aliases are handed out first come, first served: the first package
    /// whose base name is `foo` gets `foo`, the next `foo1`, and so on.
    pub fn qualified_ident(&mut self, ident: &GoIdent) -> String {
        if ident.import_path == self.own_import_path {
            return ident.go_name.clone();
        }
        if let Some(alias) = self.aliases.get(&ident.import_path) {
            return format!("{alias}.{}", ident.go_name);
        }

        let base = package_name_for(&ident.import_path);
        let mut alias = base.clone();
        let mut n = 1;
        while self.used.contains(&alias) {
            alias = format!("{base}{n}");
            n += 1;
        }
        self.used.insert(alias.clone());
        self.aliases
            .insert(ident.import_path.clone(), alias.clone());
        format!("{alias}.{}", ident.go_name)
    }

    /// `(alias, import path)` pairs sorted by import path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(path, alias)| (alias.as_str(), path.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// One `_ttrpc.pb.go` file being assembled.
#[derive(Debug)]
pub struct GeneratedFile {
    name: String,
    source: String,
    package_name: String,
    imports: Imports,
    body: String,
}

impl GeneratedFile {
    /// `name` is the output path reported to protoc; `source` is the proto
    /// path shown in the header.
    pub fn new(name: impl Into<String>, source: impl Into<String>, package: &GoPackage) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            package_name: package.name.clone(),
            imports: Imports::new(package),
            body: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn imports_mut(&mut self) -> &mut Imports {
        &mut self.imports
    }

    /// Append generated declarations. Call order is output order.
    pub fn push(&mut self, code: &str) {
        self.body.push_str(code);
    }

    /// The complete Go source: header, package clause, imports, body.
    pub fn content(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str("// Code generated by protoc-gen-go-ttrpc. DO NOT EDIT.\n");
        out.push_str(&format!("// source: {}\n", self.source));
        out.push_str(&format!("package {}\n", self.package_name));

        if !self.imports.is_empty() {
            out.push_str("\nimport (\n");
            for (alias, path) in self.imports.iter() {
                out.push_str(&format!("\t{alias} \"{path}\"\n"));
            }
            out.push_str(")\n");
        }

        let body = self.body.trim_end_matches('\n');
        if !body.is_empty() {
            out.push('\n');
            out.push_str(body);
            out.push('\n');
        }
        out
    }
}
