/// Gene sequence for deck search
///
/// A fixed-length list of collection slot indices, each in
/// `[0, collection_size)`. The deck builder walks the genes in order and turns
/// them into a legal deck:
/// - Each gene proposes one owned physical copy
/// - Repeated genes collapse to one copy
/// - Illegal cards are dropped rather than repaired
///
/// # Why not evolve decks directly?
///
/// Genetic operators stay trivial on a flat integer list:
/// - **Crossover**: swapping segments is array slicing
/// - **Mutation**: replacing one gene is a single random draw
/// - **No invalid states**: every sequence maps to some deck
///
/// # Conversion
///
/// Use `DeckBuilder::build()` to turn a GeneSequence into a deck, or
/// `DeckEvaluator::evaluate()` to build and score it in one step.
///
/// # Example
///
/// ```
/// use magique::engines::generation::GeneSequence;
///
/// // Slots 12, 3 and 3 again: two distinct owned cards
/// let genes: GeneSequence = vec![12, 3, 3];
/// assert_eq!(genes.len(), 3);
/// ```
pub type GeneSequence = Vec<u32>;
