use std::future::IntoFuture;

/// Turns raw request input into whatever the service layer consumes.
pub trait TryIntake<I>: 'static + Sync + Send {
    type To;
    type Error;
    fn emit(&self, input: I) -> Result<Self::To, Self::Error>;
}

/// Turns a service result into the response sent back to the client.
pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub struct Controller<T, P> {
    transformer: T,
    presenter: P,
}

impl<T, P> Controller<T, P> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
        }
    }

    pub fn try_intake<I>(self, input: I) -> Result<Transformed<P, T::To>, T::Error>
    where
        T: TryIntake<I>,
    {
        Ok(Transformed {
            transformed: self.transformer.emit(input)?,
            presenter: self.presenter,
        })
    }
}

impl<P> Controller<(), P> {
    /// For operations without request input, e.g. listing.
    pub async fn bypass<O, E, F, Fut>(self, f: F) -> Result<P::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f().await?))
    }
}

pub struct Transformed<P, D> {
    transformed: D,
    presenter: P,
}

impl<P, D> Transformed<P, D> {
    pub async fn handle<O, E, F, Fut>(self, f: F) -> Result<P::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f(self.transformed).await?))
    }
}
