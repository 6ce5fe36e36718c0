// SPDX-FileCopyrightText: 2024 Rot127 <unisono@quyllur.org>
// SPDX-License-Identifier: LGPL-3.0-only

use pointsto::{predicates::PointerInfo, verdict::Verdict};

/// The queries a plugin can answer about instruction operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
    IsNull,
    IsValidPointer,
    HasKnownSize,
    PointsTo,
    GetPointerInfo,
}

pub const ALL_QUERY_KINDS: [QueryKind; 5] = [
    QueryKind::IsNull,
    QueryKind::IsValidPointer,
    QueryKind::HasKnownSize,
    QueryKind::PointsTo,
    QueryKind::GetPointerInfo,
];

impl QueryKind {
    pub fn from_name(name: &str) -> Option<QueryKind> {
        match name {
            "isNull" => Some(QueryKind::IsNull),
            "isValidPointer" => Some(QueryKind::IsValidPointer),
            "hasKnownSize" => Some(QueryKind::HasKnownSize),
            "pointsTo" => Some(QueryKind::PointsTo),
            "getPointerInfo" => Some(QueryKind::GetPointerInfo),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QueryKind::IsNull => "isNull",
            QueryKind::IsValidPointer => "isValidPointer",
            QueryKind::HasKnownSize => "hasKnownSize",
            QueryKind::PointsTo => "pointsTo",
            QueryKind::GetPointerInfo => "getPointerInfo",
        }
    }

    /// Number of operands the query takes.
    pub fn arity(&self) -> usize {
        match self {
            QueryKind::IsNull | QueryKind::HasKnownSize | QueryKind::GetPointerInfo => 1,
            QueryKind::IsValidPointer | QueryKind::PointsTo => 2,
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryResult {
    Verdict(Verdict),
    PointerInfo(Option<PointerInfo>),
    /// No plugin answers the query.
    Unsupported,
}

impl std::fmt::Display for QueryResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryResult::Verdict(v) => write!(f, "{}", v),
            QueryResult::PointerInfo(Some(info)) => write!(f, "{}", info),
            QueryResult::PointerInfo(None) => write!(f, "none 0"),
            QueryResult::Unsupported => write!(f, "unsupported query"),
        }
    }
}
