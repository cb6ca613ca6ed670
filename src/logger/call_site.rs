// src/logger/call_site.rs
use std::fmt;

/// The file, function and line that issued a log call.
///
/// Built by the [`call_site!`](crate::call_site) macro at the point of the
/// call. `depth` is stamped by the logger from its trace nesting counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    function: Option<&'static str>,
    line: u32,
    depth: usize,
}

impl CallSite {
    /// Creates a call site; `file` is reduced to its base name.
    pub fn new(file: &'static str, function: Option<&'static str>, line: u32) -> Self {
        Self {
            file: base_name(file),
            function,
            line,
            depth: 0,
        }
    }

    /// A call site in the program's top-level body (no enclosing function).
    pub fn top_level(file: &'static str, line: u32) -> Self {
        Self::new(file, None, line)
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn function(&self) -> Option<&'static str> {
        self.function
    }

    /// Function name, or `__main__` for the top-level body.
    pub fn function_or_main(&self) -> &'static str {
        self.function.unwrap_or("__main__")
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// `file:func():line` or `file:__main__:line`.
    pub fn header(&self) -> String {
        match self.function {
            Some(func) => format!("{}:{}():{}", self.file, func, self.line),
            None => format!("{}:__main__:{}", self.file, self.line),
        }
    }

    /// `file, func(), ln:line`, used when annotating error messages.
    pub fn annotation(&self) -> String {
        format!("{}, {}(), ln:{}", self.file, self.function_or_main(), self.line)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header())
    }
}

/// Strips directories from a `file!()` path, accepting either separator.
pub fn base_name(path: &'static str) -> &'static str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Reduces the type name of a marker fn nested in a function to that
/// function's bare name.
///
/// `app::parse::{{closure}}::__here` becomes `parse`. A binary's `main`
/// (a two-segment path such as `app::main`) is the top-level body and maps
/// to `None`.
pub fn enclosing_function(marker_path: &'static str) -> Option<&'static str> {
    let mut path = marker_path.strip_suffix("::__here").unwrap_or(marker_path);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    let mut segments = path.rsplit("::");
    let name = segments.next().filter(|s| !s.is_empty())?;
    if name == "main" && segments.clone().count() == 1 {
        return None;
    }
    Some(name)
}

/// Expands to the bare name of the enclosing function.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::logger::call_site::enclosing_function(__type_name_of(__here))
    }};
}

/// Expands to a [`CallSite`] for the current file, function and line.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::logger::call_site::CallSite::new(file!(), $crate::function_name!(), line!())
    };
}
