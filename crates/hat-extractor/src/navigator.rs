//! Dependency tree navigation
//!
//! Maps flat token positions to parse nodes and walks head/child
//! relations. Searches never ascend above the node they start from.

use thiserror::Error;

use hat_core::{AnnotatedSentence, Token};

/// Default recursion ceiling for tree search
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tree navigation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("token {index} not reachable from node {from}")]
    NotFound { index: usize, from: usize },

    #[error("dependency tree deeper than {limit}")]
    DepthExceeded { limit: usize },
}

/// Read-only view over one sentence's dependency parse
#[derive(Debug, Clone, Copy)]
pub struct DependencyTree<'a> {
    sentence: &'a AnnotatedSentence,
    max_depth: usize,
}

impl<'a> DependencyTree<'a> {
    pub fn new(sentence: &'a AnnotatedSentence) -> Self {
        Self {
            sentence,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the recursion ceiling
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn root(&self) -> &'a Token {
        self.sentence.root()
    }

    /// Depth-first search below `from` for the token at `target`
    pub fn find(&self, from: &'a Token, target: usize) -> Result<&'a Token, NavigationError> {
        self.search(from, target, 0)?
            .ok_or(NavigationError::NotFound {
                index: target,
                from: from.index,
            })
    }

    fn search(
        &self,
        node: &'a Token,
        target: usize,
        depth: usize,
    ) -> Result<Option<&'a Token>, NavigationError> {
        if depth > self.max_depth {
            return Err(NavigationError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        if node.index == target {
            return Ok(Some(node));
        }
        for child in self.children(node) {
            if let Some(found) = self.search(child, target, depth + 1)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Syntactic head, `None` at the root
    pub fn parent(&self, token: &Token) -> Option<&'a Token> {
        token.head.and_then(|head| self.sentence.token(head))
    }

    /// Direct dependents in sentence order
    pub fn children<'t>(&self, token: &'t Token) -> impl Iterator<Item = &'a Token> + 't
    where
        'a: 't,
    {
        let sentence = self.sentence;
        token
            .children
            .iter()
            .filter_map(move |&index| sentence.token(index))
    }

    /// First dependent whose relation is one of `labels`
    pub fn child_with_dep(&self, token: &Token, labels: &[&str]) -> Option<&'a Token> {
        self.children(token)
            .find(|child| labels.iter().any(|l| child.dep.eq_ignore_ascii_case(l)))
    }

    /// Children followed by grandchildren, each level in sentence order
    ///
    /// Covers prepositional attachment (`born -> in -> London`).
    pub fn neighborhood(&self, token: &Token) -> Vec<&'a Token> {
        let children: Vec<&'a Token> = self.children(token).collect();
        let grandchildren: Vec<&'a Token> = children
            .iter()
            .flat_map(|child| self.children(*child))
            .collect();

        children.into_iter().chain(grandchildren).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hat_core::{SentenceAnnotation, TokenAnnotation};

    /// Turing was born in London .
    fn sentence() -> AnnotatedSentence {
        let raw = SentenceAnnotation::new(
            "Turing was born in London.",
            vec![
                TokenAnnotation::new(0, "Turing", "Turing", "nsubjpass", Some(2)),
                TokenAnnotation::new(1, "was", "be", "auxpass", Some(2)),
                TokenAnnotation::new(2, "born", "bear", "ROOT", None),
                TokenAnnotation::new(3, "in", "in", "prep", Some(2)),
                TokenAnnotation::new(4, "London", "London", "pobj", Some(3)),
                TokenAnnotation::new(5, ".", ".", "punct", Some(2)),
            ],
            vec![],
            Some(2),
        );
        AnnotatedSentence::from_annotation(&raw).unwrap()
    }

    #[test]
    fn test_find_from_root() {
        let sentence = sentence();
        let tree = DependencyTree::new(&sentence);

        let london = tree.find(tree.root(), 4).unwrap();
        assert_eq!(london.text, "London");
        assert_eq!(tree.parent(london).unwrap().text, "in");
    }

    #[test]
    fn test_find_never_ascends() {
        let sentence = sentence();
        let tree = DependencyTree::new(&sentence);
        let prep = sentence.token(3).unwrap();

        assert_eq!(
            tree.find(prep, 0),
            Err(NavigationError::NotFound { index: 0, from: 3 })
        );
        assert!(tree.find(prep, 4).is_ok());
    }

    #[test]
    fn test_depth_ceiling() {
        let sentence = sentence();
        let tree = DependencyTree::new(&sentence).with_max_depth(1);

        assert!(tree.find(tree.root(), 3).is_ok());
        assert_eq!(
            tree.find(tree.root(), 4),
            Err(NavigationError::DepthExceeded { limit: 1 })
        );
    }

    #[test]
    fn test_child_with_dep() {
        let sentence = sentence();
        let tree = DependencyTree::new(&sentence);
        let root = tree.root();

        assert_eq!(
            tree.child_with_dep(root, &["nsubj", "nsubjpass"]).unwrap().text,
            "Turing"
        );
        assert!(tree.child_with_dep(root, &["dobj"]).is_none());
        assert!(tree.parent(root).is_none());
    }

    #[test]
    fn test_children_borrow_sentence_tokens() {
        let sentence = sentence();
        let tree = DependencyTree::new(&sentence);

        let children: Vec<&Token> = tree.children(tree.root()).collect();
        let texts: Vec<&str> = children.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Turing", "was", "in", "."]);
        assert!(std::ptr::eq(children[2], sentence.token(3).unwrap()));
        assert_eq!(tree.children(sentence.token(4).unwrap()).count(), 0);
    }

    #[test]
    fn test_neighborhood_levels() {
        let sentence = sentence();
        let tree = DependencyTree::new(&sentence);

        let texts: Vec<&str> = tree
            .neighborhood(tree.root())
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Turing", "was", "in", ".", "London"]);
    }
}
